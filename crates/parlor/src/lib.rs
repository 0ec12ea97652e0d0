#![forbid(unsafe_code)]

//! Public facade for the Parlor toolkit.
//!
//! Re-exports the member crates under stable names and offers a
//! [`prelude`] for the common surface.

pub use parlor_core as core;
pub use parlor_mail as mail;
pub use parlor_modal as modal;

/// The commonly used surface in one import.
pub mod prelude {
    pub use parlor_core::{
        FilterChain, Hook, MemorySettings, Px, SettingValue, Settings, Size, Viewport,
    };
    pub use parlor_mail::{
        Envelope, MailError, Mailer, MailTransport, MemoryTemplates, MemoryTransport,
        PlaceholderRegistry, SiteContext, TemplateArgs, TemplateResolver,
    };
    pub use parlor_modal::{
        BodyStyle, Breakpoint, ComputedStyle, Content, GeneratorOutput, ImageInfo, ModalId,
        ModalManager, ModalMetrics, ModalOptions, ModalSize, OpenEvent, Query,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn facade_exposes_both_components() {
        let mut modals = ModalManager::new(Viewport::new(1280.0, 720.0));
        let id = modals.open(ModalOptions::new().content("<p>hi</p>"), None);
        assert_eq!(modals.current(), Some(id));
        modals.close();
        assert!(modals.is_empty());

        let transport = MemoryTransport::new();
        let mut mailer = Mailer::new(
            MemorySettings::new()
                .with("welcome_on", true)
                .with("welcome_sub", "Hello")
                .with("mail_from", "Desk")
                .with("mail_from_addr", "desk@example.test"),
            MemoryTemplates::new().with("email/welcome", "Hi"),
            transport.clone(),
            PlaceholderRegistry::new(SiteContext::default()),
        );
        mailer
            .send("user@example.test", "welcome", &TemplateArgs::new())
            .unwrap();
        assert_eq!(transport.count(), 1);
    }
}
