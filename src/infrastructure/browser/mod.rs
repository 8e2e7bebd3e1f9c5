//! Browser automation over the W3C WebDriver protocol

mod webdriver;

pub use webdriver::{WebDriverLauncher, WebDriverOptions, WebDriverPage};
