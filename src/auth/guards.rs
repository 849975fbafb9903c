use async_graphql::{Context, Error, ErrorExtensions, Result};

use crate::auth::AuthenticatedUser;

/// Mutations need an acting user.
pub fn require_auth<'ctx>(ctx: &'ctx Context<'_>) -> Result<&'ctx AuthenticatedUser> {
    ctx.data::<AuthenticatedUser>().map_err(|_| {
        Error::new("Authentication required")
            .extend_with(|_, e| e.set("code", "UNAUTHENTICATED"))
    })
}
