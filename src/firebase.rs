use core::fmt::{self, Write};

use heapless::String;

use crate::constants::FIREBASE_URL_MAX_LEN;

pub type FirebaseUrl = String<FIREBASE_URL_MAX_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    InsecureHost,
    MissingHostname,
    UrlTooLong,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InsecureHost => write!(f, "Firebase host must use https://"),
            Error::MissingHostname => write!(f, "Firebase host has no hostname"),
            Error::UrlTooLong => write!(f, "URL exceeds {} bytes", FIREBASE_URL_MAX_LEN),
        }
    }
}

/// REST URL of a node in the realtime database: `<host>/<path>.json?auth=<token>`.
///
/// The auth query is left out when `auth` is empty.
pub fn url(host: &str, path: &str, auth: &str) -> Result<FirebaseUrl, Error> {
    let hostname = host
        .strip_prefix("https://")
        .ok_or(Error::InsecureHost)?
        .trim_end_matches('/');
    if hostname.is_empty() {
        return Err(Error::MissingHostname);
    }
    let path = path.trim_matches('/');

    let mut url = FirebaseUrl::new();
    write!(url, "https://{}/{}.json", hostname, path).map_err(|_| Error::UrlTooLong)?;
    if !auth.is_empty() {
        write!(url, "?auth={}", auth).map_err(|_| Error::UrlTooLong)?;
    }
    Ok(url)
}
