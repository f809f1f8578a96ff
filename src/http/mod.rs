pub use self::date::{HttpDate, ListingDate};
pub use self::error::{ConnectionError, ParseRequestError};
pub use self::method::Method;
pub use self::request::RequestLine;
pub use self::response::Response;
pub use self::response_builder::ResponseBuilder;
pub use self::status_code::StatusCode;

mod date;
mod error;
mod method;
mod request;
mod response;
mod response_builder;
mod status_code;
