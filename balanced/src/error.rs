use nodeapi::ApiError;
use records::RecordError;

use std::error;
use std::fmt;

// Failure of one open/accept/recover attempt. Validation, timeout and
// recovery errors are final for the attempt; a chain error is only raised
// after the broadcast loop exhausted its tolerance; a peer error is what
// remains after the payment fallback also failed to apply.
#[derive(Debug)]
pub enum Error {
    Validation(String),
    Peer(String),
    Payment(String),
    Chain(String),
    Timeout(String),
    Recovery(String),
    Records(RecordError),
    Api(ApiError),
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use self::Error::*;

        match self {
            &Records(ref e) => Some(e),
            &Api(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Error::*;

        match self {
            &Validation(ref msg) => write!(f, "validation error: {}", msg),
            &Peer(ref msg) => write!(f, "peer error: {}", msg),
            &Payment(ref msg) => write!(f, "payment error: {}", msg),
            &Chain(ref msg) => write!(f, "chain error: {}", msg),
            &Timeout(ref msg) => write!(f, "timed out: {}", msg),
            &Recovery(ref msg) => write!(f, "recovery error: {}", msg),
            &Records(ref e) => write!(f, "record error: {}", e),
            &Api(ref e) => write!(f, "{}", e),
        }
    }
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Self {
        Error::Api(e)
    }
}

impl From<RecordError> for Error {
    fn from(e: RecordError) -> Self {
        Error::Records(e)
    }
}

impl Error {
    pub fn is_validation(&self) -> bool {
        match self {
            &Error::Validation(_) => true,
            _ => false,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            &Error::Timeout(_) => true,
            _ => false,
        }
    }
}
