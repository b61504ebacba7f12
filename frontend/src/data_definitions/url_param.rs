//! Route segments carrying typed state, CBOR-encoded then base64url'd.

use std::{fmt::Display, str::FromStr};

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use serde::{Deserialize, Serialize};


#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UrlParam<T>(pub T);

impl <T> From<T> for UrlParam<T> {
    fn from(value: T) -> Self {
        UrlParam(value)
    }
}

impl<T: Serialize> UrlParam<T> {
    fn encode(&self) -> Option<String> {
        let mut cbor = Vec::new();
        ciborium::into_writer(&self.0, &mut cbor).ok()?;
        Some(URL_SAFE.encode(cbor))
    }
}

// An unencodable value renders as an empty segment, which parses back as an error.
impl<T: Serialize> Display for UrlParam<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode().unwrap_or_default())
    }
}

#[derive(Debug)]
pub enum UrlParamError {
    Base64(base64::DecodeError),
    Cbor(ciborium::de::Error<std::io::Error>),
}

impl std::fmt::Display for UrlParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base64(err) => write!(f, "route segment is not base64url: {}", err),
            Self::Cbor(err) => write!(f, "route segment does not decode: {}", err),
        }
    }
}

impl<T: for<'de> Deserialize<'de>> FromStr for UrlParam<T> {
    type Err = UrlParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cbor = URL_SAFE.decode(s.as_bytes()).map_err(UrlParamError::Base64)?;
        let value = ciborium::from_reader(cbor.as_slice()).map_err(UrlParamError::Cbor)?;
        Ok(UrlParam(value))
    }
}
