/// Generate a unique id for stored records such as contact messages.
///
/// Returns a 21-character URL-friendly string.
pub fn generate_id() -> String {
    nanoid::nanoid!()
}
