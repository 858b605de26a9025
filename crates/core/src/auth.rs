//! Authentication header injection

use courier_domain::constants::AUTHORIZATION_HEADER;
use courier_domain::AuthenticationDirective;

/// Translates an [`AuthenticationDirective`] into an `Authorization` header
pub struct AuthenticationInjector;

impl AuthenticationInjector {
    /// Return `headers` plus the authorization header for `directive`.
    ///
    /// Unknown schemes and absent directives return an unchanged copy. The
    /// input is never modified.
    pub fn apply(
        headers: &[(String, String)],
        directive: Option<&AuthenticationDirective>,
    ) -> Vec<(String, String)> {
        let mut augmented = headers.to_vec();
        if let Some(value) = directive.and_then(AuthenticationDirective::header_value) {
            augmented.push((AUTHORIZATION_HEADER.to_string(), value));
        }
        augmented
    }
}

#[cfg(test)]
mod tests {
    use courier_domain::AuthScheme;

    use super::*;

    fn base_headers() -> Vec<(String, String)> {
        vec![("Accept".to_string(), "application/json".to_string())]
    }

    #[test]
    fn test_bearer_appends_header() {
        let headers =
            AuthenticationInjector::apply(&base_headers(), Some(&AuthenticationDirective::bearer("abc")));
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1], ("Authorization".to_string(), "Bearer abc".to_string()));
    }

    #[test]
    fn test_basic_uses_credential_verbatim() {
        let headers = AuthenticationInjector::apply(
            &[],
            Some(&AuthenticationDirective::basic("dXNlcjpwYXNz")),
        );
        assert_eq!(headers, vec![("Authorization".to_string(), "Basic dXNlcjpwYXNz".to_string())]);
    }

    #[test]
    fn test_unknown_and_absent_are_noops() {
        let unknown = AuthenticationDirective::new(AuthScheme::Unknown, "ignored");
        assert_eq!(AuthenticationInjector::apply(&base_headers(), Some(&unknown)), base_headers());
        assert_eq!(AuthenticationInjector::apply(&base_headers(), None), base_headers());
    }

    #[test]
    fn test_apply_is_idempotent_for_same_input() {
        let directive = AuthenticationDirective::bearer("abc");
        let input = base_headers();
        let first = AuthenticationInjector::apply(&input, Some(&directive));
        let second = AuthenticationInjector::apply(&input, Some(&directive));
        assert_eq!(first, second);
        assert_eq!(input, base_headers());
    }
}
