#![forbid(unsafe_code)]

//! Placeholder token substitution.
//!
//! Tokens and their replacement values live in two parallel filter
//! chains so host code can extend either end. The lists are matched 1:1
//! by position; [`PlaceholderRegistry::substitute`] assembles both and
//! refuses to run when their lengths diverge — a misaligned pair would
//! otherwise substitute the wrong values without anyone noticing.

use parlor_core::hooks::FilterChain;

use crate::mailer::MailError;

/// The built-in tokens, in registry order.
pub const DEFAULT_TOKENS: [&str; 7] = [
    "{user_profile_link}",
    "{site_url}",
    "{admin_email}",
    "{submitted_registration}",
    "{login_url}",
    "{password}",
    "{account_activation_link}",
];

/// Host-provided values backing the built-in tokens.
#[derive(Debug, Clone, Default)]
pub struct SiteContext {
    pub profile_url: String,
    pub site_url: String,
    pub admin_email: String,
    pub submitted_registration: String,
    pub login_url: String,
    pub password_text: String,
    pub activation_link: String,
}

/// Parallel token/replacement chains.
pub struct PlaceholderRegistry {
    tokens: FilterChain<Vec<String>>,
    replacements: FilterChain<Vec<String>>,
}

impl PlaceholderRegistry {
    /// A registry with no tokens at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tokens: FilterChain::new(),
            replacements: FilterChain::new(),
        }
    }

    /// A registry seeded with the built-in tokens, resolved from the
    /// given site context.
    #[must_use]
    pub fn new(context: SiteContext) -> Self {
        let mut registry = Self::empty();
        registry.extend_tokens(|mut tokens| {
            tokens.extend(DEFAULT_TOKENS.iter().map(ToString::to_string));
            tokens
        });
        registry.extend_replacements(move |mut values| {
            values.push(context.profile_url.clone());
            values.push(context.site_url.clone());
            values.push(context.admin_email.clone());
            values.push(context.submitted_registration.clone());
            values.push(context.login_url.clone());
            values.push(context.password_text.clone());
            values.push(context.activation_link.clone());
            values
        });
        registry
    }

    /// Register a transform over the token list.
    pub fn extend_tokens(&mut self, f: impl FnMut(Vec<String>) -> Vec<String> + 'static) {
        self.tokens.add(f);
    }

    /// Register a transform over the replacement list.
    pub fn extend_replacements(&mut self, f: impl FnMut(Vec<String>) -> Vec<String> + 'static) {
        self.replacements.add(f);
    }

    /// Assemble both lists and replace every token occurrence.
    ///
    /// Fails with [`MailError::PlaceholderMismatch`] when the lists have
    /// diverged in length.
    pub fn substitute(&mut self, text: &str) -> Result<String, MailError> {
        let tokens = self.tokens.apply(Vec::new());
        let replacements = self.replacements.apply(Vec::new());
        if tokens.len() != replacements.len() {
            return Err(MailError::PlaceholderMismatch {
                tokens: tokens.len(),
                replacements: replacements.len(),
            });
        }

        let mut out = text.to_string();
        for (token, replacement) in tokens.iter().zip(&replacements) {
            if !token.is_empty() {
                out = out.replace(token, replacement);
            }
        }
        Ok(out)
    }
}

impl core::fmt::Debug for PlaceholderRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PlaceholderRegistry")
            .field("token_filters", &self.tokens.len())
            .field("replacement_filters", &self.replacements.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> SiteContext {
        SiteContext {
            site_url: "https://example.test".to_string(),
            admin_email: "admin@example.test".to_string(),
            ..SiteContext::default()
        }
    }

    #[test]
    fn substitutes_registered_token_verbatim() {
        let mut registry = PlaceholderRegistry::new(context());
        let out = registry
            .substitute("Visit {site_url} or write {admin_email}; {unknown} stays.")
            .unwrap();
        assert_eq!(
            out,
            "Visit https://example.test or write admin@example.test; {unknown} stays."
        );
    }

    #[test]
    fn empty_registry_is_identity() {
        let mut registry = PlaceholderRegistry::empty();
        assert_eq!(registry.substitute("{site_url}").unwrap(), "{site_url}");
    }

    #[test]
    fn host_extensions_substitute_in_order() {
        let mut registry = PlaceholderRegistry::new(context());
        registry.extend_tokens(|mut tokens| {
            tokens.push("{plan_name}".to_string());
            tokens
        });
        registry.extend_replacements(|mut values| {
            values.push("Gold".to_string());
            values
        });
        assert_eq!(registry.substitute("Plan: {plan_name}").unwrap(), "Plan: Gold");
    }

    #[test]
    fn misaligned_lists_fail_fast() {
        let mut registry = PlaceholderRegistry::new(context());
        registry.extend_tokens(|mut tokens| {
            tokens.push("{orphan}".to_string());
            tokens
        });

        let err = registry.substitute("anything").unwrap_err();
        match err {
            MailError::PlaceholderMismatch { tokens, replacements } => {
                assert_eq!(tokens, 8);
                assert_eq!(replacements, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
