use lambda_http::{Body, Error as LambdaError, Response};

/// Handler failure.
///
/// `HttpError` carries a finished response for the client and is returned to
/// the runtime as a success. Anything else is a `LambdaError` and fails the
/// invocation.
#[derive(Debug)]
pub enum Error {
    HttpError(Response<Body>),
    LambdaError(LambdaError),
}

impl<E> From<E> for Error
where
    E: Into<LambdaError>,
{
    fn from(err: E) -> Self {
        Error::LambdaError(err.into())
    }
}

impl Error {
    pub fn into_response(self) -> Result<Response<Body>, LambdaError> {
        match self {
            Error::HttpError(val) => Ok(val),
            Error::LambdaError(err) => Err(err),
        }
    }
}
