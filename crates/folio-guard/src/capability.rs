//! Capability guard.
//!
//! Checks the deployment flags an operation declared against the
//! [`ConfigFlags`] snapshot. Runs before identity resolution: a disabled
//! capability is a property of the deployment, not of the caller.

use folio_config::ConfigFlags;
use folio_core::{AuthError, AuthResult};
use tracing::warn;

use crate::requirement::OperationRequirement;

/// Fail with [`AuthError::ServerError`] if any required flag is disabled.
///
/// A flag missing from `flags` counts as disabled.
///
/// # Errors
///
/// Returns [`AuthError::ServerError`] naming nothing to the caller; the
/// first disabled flag is logged.
pub fn check_capabilities(
    flags: &ConfigFlags,
    requirement: &OperationRequirement,
) -> AuthResult<()> {
    match requirement
        .required_config
        .iter()
        .find(|flag| !flags.is_enabled(**flag))
    {
        Some(flag) => {
            warn!(flag = %flag, env_var = %flag.env_var(), "required capability is disabled");
            Err(AuthError::ServerError)
        },
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_config::ConfigFlag;

    #[test]
    fn test_no_requirements_always_pass() {
        assert!(check_capabilities(&ConfigFlags::none(), &OperationRequirement::workspace()).is_ok());
    }

    #[test]
    fn test_disabled_flag_is_server_error() {
        let requirement = OperationRequirement::workspace().config([ConfigFlag::Billing]);
        assert_eq!(
            check_capabilities(&ConfigFlags::none(), &requirement),
            Err(AuthError::ServerError)
        );
    }

    #[test]
    fn test_all_flags_must_be_enabled() {
        let requirement =
            OperationRequirement::user().config([ConfigFlag::GithubApp, ConfigFlag::GithubOauth]);

        let partial: ConfigFlags = [ConfigFlag::GithubApp].into_iter().collect();
        assert_eq!(
            check_capabilities(&partial, &requirement),
            Err(AuthError::ServerError)
        );

        let both: ConfigFlags = [ConfigFlag::GithubApp, ConfigFlag::GithubOauth]
            .into_iter()
            .collect();
        assert!(check_capabilities(&both, &requirement).is_ok());
        assert!(check_capabilities(&ConfigFlags::all(), &requirement).is_ok());
    }
}
