//! Line-driven notes browser.

use folio_core::navigation::HistoryPlatform;
use folio_core::Browser;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::display::{screen, Choice, Screen};

const HELP: &str = "\
  <n>        open the numbered item
  /<text>    search (empty '/' clears)
  b, f       back, forward
  u          up to the books of this category
  h          home (categories)
  r          reload the vault structure
  x          dismiss the message
  q          quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(usize),
    Search(String),
    Back,
    Forward,
    Up,
    Home,
    Reload,
    Dismiss,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if let Some(query) = line.strip_prefix('/') {
            return Some(Command::Search(query.to_string()));
        }
        if let Ok(n) = line.parse::<usize>() {
            return Some(Command::Open(n));
        }
        let command = match line {
            "b" | "back" => Command::Back,
            "f" | "forward" => Command::Forward,
            "u" | "up" => Command::Up,
            "h" | "home" => Command::Home,
            "r" | "reload" => Command::Reload,
            "x" => Command::Dismiss,
            "?" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

pub struct Repl<H> {
    browser: Browser<H>,
    screen: Screen,
}

impl<H: HistoryPlatform> Repl<H> {
    pub fn new(browser: Browser<H>) -> Self {
        Self {
            browser,
            screen: Screen::default(),
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.browser.start().await;
        self.redraw();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let Some(command) = Command::parse(&line) else {
                println!("Unknown command, '?' for help");
                continue;
            };
            if command == Command::Quit {
                break;
            }
            if command == Command::Help {
                println!("{}", HELP);
                continue;
            }
            self.execute(command).await;
            self.redraw();
        }
        Ok(())
    }

    pub async fn execute(&mut self, command: Command) {
        match command {
            Command::Open(n) => {
                let Some(choice) = self.screen.choice(n).cloned() else {
                    log::debug!("No item numbered {}", n);
                    return;
                };
                self.open(choice).await;
            }
            Command::Search(query) => {
                self.browser.set_query(&query);
                self.browser.settle_search().await;
            }
            Command::Back => {
                if !self.browser.back().await {
                    println!("Nothing to go back to");
                }
            }
            Command::Forward => {
                self.browser.forward().await;
            }
            Command::Up => {
                if self.browser.state().selected_category.is_some() {
                    self.browser.show_books();
                }
            }
            Command::Home => self.browser.reset(),
            Command::Reload => self.browser.load_structure().await,
            Command::Dismiss => self.browser.dismiss_notice(),
            Command::Help | Command::Quit => {}
        }
    }

    async fn open(&mut self, choice: Choice) {
        match choice {
            Choice::Category(name) => self.browser.select_category(&name),
            Choice::Book(name) => self.browser.select_book(&name).await,
            Choice::Child(id) => self.browser.open_child(&id).await,
            Choice::Link(target) => self.browser.follow_link(&target).await,
            Choice::SearchResult(id) => {
                self.browser.clear_query();
                self.browser.open_note(&id).await;
            }
        }
    }

    /// Recompute the numbered choices; printing is skipped under test
    fn redraw(&mut self) {
        self.screen = screen(self.browser.state());
        if cfg!(not(test)) {
            println!("\n{}", self.screen.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::config::BrowserConfig;
    use folio_core::{LocalApi, MemoryHistory, Vault};
    use folio_core::vfs::PhysicalFileSystem;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(" 3 "), Some(Command::Open(3)));
        assert_eq!(Command::parse("/sapiens"), Some(Command::Search("sapiens".into())));
        assert_eq!(Command::parse("/"), Some(Command::Search(String::new())));
        assert_eq!(Command::parse("b"), Some(Command::Back));
        assert_eq!(Command::parse("quit"), Some(Command::Quit));
        assert_eq!(Command::parse("open"), None);
    }

    fn vault() -> TempDir {
        let dir = TempDir::new().unwrap();
        let book = dir.path().join("Science").join("Sapiens");
        fs::create_dir_all(&book).unwrap();
        fs::write(
            book.join("Notes - Sapiens.md"),
            "# Sapiens\n\n[[Cognitive Revolution]] then [[Agricultural Revolution]].",
        )
        .unwrap();
        fs::write(
            book.join("Cognitive Revolution.md"),
            "# Cognitive Revolution\n\nFiction let strangers cooperate.",
        )
        .unwrap();
        fs::write(
            book.join("Agricultural Revolution.md"),
            "# Agricultural Revolution\n\nHistory's biggest fraud.",
        )
        .unwrap();
        dir
    }

    async fn repl(dir: &TempDir) -> Repl<MemoryHistory> {
        let vault = Vault::new(dir.path().to_path_buf(), Arc::new(PhysicalFileSystem));
        let api = Arc::new(LocalApi::new(Arc::new(vault)));
        let mut repl = Repl::new(Browser::new(api, MemoryHistory::new(), &BrowserConfig::default()));
        repl.browser.start().await;
        repl.redraw();
        repl
    }

    #[tokio::test]
    async fn test_drill_down_by_number_and_back() {
        let dir = vault();
        let mut repl = repl(&dir).await;

        repl.execute(Command::Open(1)).await;
        repl.redraw();
        assert_eq!(repl.screen.choice(1), Some(&Choice::Book("Sapiens".into())));

        repl.execute(Command::Open(1)).await;
        repl.redraw();
        let state = repl.browser.state();
        assert_eq!(state.current_note.as_ref().unwrap().title, "Sapiens");
        assert_eq!(
            repl.screen.choice(1),
            Some(&Choice::Link("Cognitive Revolution".into()))
        );

        repl.execute(Command::Open(1)).await;
        repl.redraw();
        let state = repl.browser.state();
        assert_eq!(
            state.current_note.as_ref().unwrap().title,
            "Cognitive Revolution"
        );
        assert_eq!(state.stack.len(), 1);

        repl.execute(Command::Back).await;
        let state = repl.browser.state();
        assert_eq!(state.current_note.as_ref().unwrap().title, "Sapiens");
        assert!(state.stack.is_empty());
    }

    #[tokio::test]
    async fn test_search_then_open_result() {
        let dir = vault();
        let mut repl = repl(&dir).await;

        repl.execute(Command::Search("agricultural".into())).await;
        repl.redraw();
        assert!(matches!(
            repl.screen.choice(1),
            Some(Choice::SearchResult(_))
        ));

        repl.execute(Command::Open(1)).await;
        let state = repl.browser.state();
        assert!(state.search.query.is_empty());
        assert_eq!(
            state.current_note.as_ref().unwrap().title,
            "Agricultural Revolution"
        );
    }
}
