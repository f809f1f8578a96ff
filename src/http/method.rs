use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Connect,
    Trace,
}

const NAMES: [(Method, &str); 9] = [
    (Method::Get, "GET"),
    (Method::Post, "POST"),
    (Method::Put, "PUT"),
    (Method::Delete, "DELETE"),
    (Method::Patch, "PATCH"),
    (Method::Options, "OPTIONS"),
    (Method::Head, "HEAD"),
    (Method::Connect, "CONNECT"),
    (Method::Trace, "TRACE"),
];

impl Method {
    pub fn as_str(&self) -> &'static str {
        NAMES
            .iter()
            .find(|(method, _)| method == self)
            .map_or("", |(_, name)| *name)
    }
}

impl FromStr for Method {
    type Err = MethodError;

    /// Method tokens are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(method, _)| *method)
            .ok_or_else(|| MethodError(s.to_string()))
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown method {0:?}")]
pub struct MethodError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parsing_is_case_sensitive() {
        assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("DELETE".parse::<Method>().unwrap(), Method::Delete);
        assert!("get".parse::<Method>().is_err());
        assert!("GETX".parse::<Method>().is_err());
    }

    #[test]
    fn method_display_matches_wire_form() {
        assert_eq!(Method::Options.to_string(), "OPTIONS");
        assert_eq!(Method::Get.to_string(), "GET");
    }
}
