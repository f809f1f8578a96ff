use nom::{
    bytes::complete::take_till1, character::complete::char, sequence::separated_pair, IResult,
};

use super::{method::Method, ParseRequestError};

/// The only part of a request this server looks at: the first line.
#[derive(Debug, PartialEq, Eq)]
pub struct RequestLine<'a> {
    method: Method,
    target: &'a str,
}

impl<'a> RequestLine<'a> {
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The raw request target, not percent-decoded.
    pub fn target(&self) -> &'a str {
        self.target
    }
}

impl<'a> TryFrom<&'a str> for RequestLine<'a> {
    type Error = ParseRequestError;

    fn try_from(line: &'a str) -> Result<Self, Self::Error> {
        let line = line.trim_end_matches(['\r', '\n']);

        if line.is_empty() {
            return Err(ParseRequestError::Empty);
        }

        let (_, (method, target)) =
            method_and_target(line).map_err(|_| ParseRequestError::Request(line.to_string()))?;

        let method = method.parse::<Method>()?;

        if method != Method::Get {
            return Err(ParseRequestError::UnsupportedMethod(method));
        }

        Ok(Self { method, target })
    }
}

// Whatever follows the target (usually the protocol version) is ignored.
fn method_and_target(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(token, char(' '), token)(input)
}

fn token(input: &str) -> IResult<&str, &str> {
    take_till1(|c| c == ' ')(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_get_request_line() {
        let line = RequestLine::try_from("GET /index.html HTTP/1.1\r\n").unwrap();

        assert_eq!(line.method(), &Method::Get);
        assert_eq!(line.target(), "/index.html");
    }

    #[test]
    fn protocol_token_is_optional() {
        let line = RequestLine::try_from("GET /a%20b.txt").unwrap();

        assert_eq!(line.target(), "/a%20b.txt");
    }

    #[test]
    fn empty_line_is_rejected() {
        assert!(matches!(
            RequestLine::try_from(""),
            Err(ParseRequestError::Empty)
        ));
        assert!(matches!(
            RequestLine::try_from("\r\n"),
            Err(ParseRequestError::Empty)
        ));
    }

    #[test]
    fn single_token_is_rejected() {
        assert!(matches!(
            RequestLine::try_from("GET"),
            Err(ParseRequestError::Request(_))
        ));
        assert!(matches!(
            RequestLine::try_from("GET \r\n"),
            Err(ParseRequestError::Request(_))
        ));
    }

    #[test]
    fn only_get_is_accepted() {
        assert!(matches!(
            RequestLine::try_from("POST / HTTP/1.1"),
            Err(ParseRequestError::UnsupportedMethod(Method::Post))
        ));
        assert!(matches!(
            RequestLine::try_from("HEAD / HTTP/1.1"),
            Err(ParseRequestError::UnsupportedMethod(Method::Head))
        ));
        assert!(matches!(
            RequestLine::try_from("BREW / HTCPCP/1.0"),
            Err(ParseRequestError::Method(_))
        ));
    }
}
