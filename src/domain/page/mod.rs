//! Browser page abstraction used by the scraping pipeline

mod session;

pub use session::{BrowserLauncher, PageSession};

#[cfg(test)]
pub use session::mock::{FakeDocument, FakeLauncher, FakePage, HeightProfile};
