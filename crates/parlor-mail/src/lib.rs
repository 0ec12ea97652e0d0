#![forbid(unsafe_code)]

//! Template-driven notification mail for membership sites.
//!
//! [`Mailer`] resolves a named template through the host's
//! [`TemplateResolver`], shapes it for HTML or plain-text delivery, runs
//! placeholder substitution, and hands the finished [`Envelope`] to a
//! [`MailTransport`]. Sends are best-effort and fire exactly once: there
//! is no queue, no retry, and delivery failure is whatever the transport
//! does with it.
//!
//! Two conditions make [`Mailer::send`] a deliberate silent no-op: a
//! recipient that fails address validation, and a template whose
//! `<key>_on` setting is not truthy. Both log at `debug` and return
//! `Ok(())`.

pub mod address;
pub mod mailer;
pub mod placeholders;
pub mod template;
pub mod text;

pub use mailer::{
    Envelope, MailError, MailHooks, Mailer, MailTransport, MemoryTransport, SendEvent,
    DEFAULT_BODY_ATTRS, DEFAULT_HTML_SHELL,
};
pub use placeholders::{PlaceholderRegistry, SiteContext};
pub use template::{MemoryTemplates, TemplateArgs, TemplateResolver};
