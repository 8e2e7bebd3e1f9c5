//! Credentials domain - scraping login and generative backend key

mod credential;

pub use credential::{CredentialStore, Credentials, LinkedinCredentials, mask_email, mask_secret};
