use crate::Coordinates;

use super::{LocationError, PositionFuture, PositionSource};

/// Always reports the same, preconfigured position.
pub struct Fixed(pub Coordinates);

impl PositionSource for Fixed {
    fn current_position(&self) -> PositionFuture<'_> {
        let coordinates = self.0;
        Box::pin(async move { Ok(coordinates) })
    }
}

/// Behaves like a platform whose location permission was refused.
pub struct Denied;

impl PositionSource for Denied {
    fn current_position(&self) -> PositionFuture<'_> {
        Box::pin(async { Err(LocationError::PermissionDenied) })
    }
}

#[cfg(test)]
mod tests {
    use futures_lite::future::block_on;

    use super::*;

    #[test]
    fn fixed_reports_its_position() {
        let source = Fixed(Coordinates::new(1.0, 2.0));
        assert_eq!(
            block_on(source.current_position()),
            Ok(Coordinates::new(1.0, 2.0))
        );
    }

    #[test]
    fn denied_refuses() {
        assert_eq!(
            block_on(Denied.current_position()),
            Err(LocationError::PermissionDenied)
        );
    }
}
