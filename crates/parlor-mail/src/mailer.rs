#![forbid(unsafe_code)]

//! Message rendering and dispatch.
//!
//! # Invariants
//!
//! 1. One `send` produces at most one `deliver` call; never more.
//! 2. An invalid recipient or a disabled template produces zero
//!    `deliver` calls and returns `Ok(())`.
//! 3. The envelope is built fresh per send and not retained.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Invalid recipient | Silent no-op, `debug` log |
//! | `<key>_on` not truthy | Silent no-op, `debug` log |
//! | Template unresolved | `Err(MailError::Template)` |
//! | Placeholder lists misaligned | `Err(MailError::PlaceholderMismatch)` |
//! | Transport failure | Not surfaced; the transport owns it |

use core::fmt;
use std::path::PathBuf;

use parlor_core::hooks::{FilterChain, Hook};
use parlor_core::settings::Settings;

use crate::address;
use crate::placeholders::PlaceholderRegistry;
use crate::template::{TemplateArgs, TemplateResolver};
use crate::text;

/// Default document shell opener for HTML mail.
pub const DEFAULT_HTML_SHELL: &str = "<html>";

/// Default attribute string for the HTML mail `<body>` element.
pub const DEFAULT_BODY_ATTRS: &str = "style=\"background: #f2f2f2;-webkit-font-smoothing: antialiased;-moz-osx-font-smoothing: grayscale;\"";

/// Errors from rendering and dispatch configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailError {
    /// Token and replacement lists diverged in length.
    PlaceholderMismatch { tokens: usize, replacements: usize },
    /// The template resolver could not produce a body.
    Template { path: String, reason: String },
}

impl fmt::Display for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlaceholderMismatch { tokens, replacements } => write!(
                f,
                "placeholder lists misaligned: {tokens} tokens vs {replacements} replacements"
            ),
            Self::Template { path, reason } => {
                write!(f, "template '{path}' failed to resolve: {reason}")
            }
        }
    }
}

impl std::error::Error for MailError {}

/// One outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    /// Header lines, in order. The first is always the `From:` line.
    pub headers: Vec<String>,
    pub attachments: Vec<PathBuf>,
}

/// Hands a finished envelope to the host's delivery primitive. No
/// meaningful return: delivery outcome is the transport's business.
pub trait MailTransport {
    fn deliver(&mut self, envelope: Envelope);
}

/// A transport that records envelopes. Clones share the same log, so
/// tests keep a clone and hand the original to the mailer.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    sent: std::rc::Rc<std::cell::RefCell<Vec<Envelope>>>,
}

impl MemoryTransport {
    /// Create an empty transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far.
    #[must_use]
    pub fn sent(&self) -> Vec<Envelope> {
        self.sent.borrow().clone()
    }

    /// Number of deliveries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl MailTransport for MemoryTransport {
    fn deliver(&mut self, envelope: Envelope) {
        self.sent.borrow_mut().push(envelope);
    }
}

/// Payload for the send notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendEvent {
    pub recipient: String,
    pub template: String,
}

/// Extension points of a [`Mailer`].
#[derive(Debug, Default)]
pub struct MailHooks {
    /// Runs over the subject line before placeholder substitution.
    pub subject: FilterChain<String>,
    /// Runs over the HTML document shell opener.
    pub html_shell: FilterChain<String>,
    /// Runs over the `<body>` attribute string.
    pub body_attrs: FilterChain<String>,
    /// Contributes markup between `<body>` and the template body.
    pub pre_body: FilterChain<String>,
    /// Contributes markup between the template body and `</body>`.
    pub post_body: FilterChain<String>,
    /// Runs over the fully shaped message content.
    pub content: FilterChain<String>,
    /// Fired before a message is composed.
    pub before_send: Hook<SendEvent>,
    /// Fired after the transport accepted the envelope.
    pub after_send: Hook<SendEvent>,
}

impl MailHooks {
    /// Create hooks with nothing registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Template-driven notification mailer.
pub struct Mailer {
    settings: Box<dyn Settings>,
    templates: Box<dyn TemplateResolver>,
    transport: Box<dyn MailTransport>,
    placeholders: PlaceholderRegistry,
    /// Extension points; register observers and filters directly.
    pub hooks: MailHooks,
}

impl Mailer {
    /// Assemble a mailer from its collaborators.
    pub fn new(
        settings: impl Settings + 'static,
        templates: impl TemplateResolver + 'static,
        transport: impl MailTransport + 'static,
        placeholders: PlaceholderRegistry,
    ) -> Self {
        Self {
            settings: Box::new(settings),
            templates: Box::new(templates),
            transport: Box::new(transport),
            placeholders,
            hooks: MailHooks::new(),
        }
    }

    /// The placeholder registry, for host extensions.
    pub fn placeholders_mut(&mut self) -> &mut PlaceholderRegistry {
        &mut self.placeholders
    }

    /// Whether messages render as HTML (the `email_html` setting).
    #[must_use]
    pub fn html_mode(&self) -> bool {
        self.settings.truthy("email_html")
    }

    /// Whether the transport layer should convert newlines to breaks.
    /// Only plain-text mail wants that.
    #[must_use]
    pub fn newline_to_br(&self) -> bool {
        !self.html_mode()
    }

    /// Render a template to finished message content.
    ///
    /// HTML mode wraps the resolved body in a document shell; plain-text
    /// mode strips markup and, only when stripping changed something,
    /// collapses `&nbsp;` entities and leading line whitespace.
    pub fn render(&mut self, slug: &str, args: &TemplateArgs) -> Result<String, MailError> {
        let path = format!("email/{slug}");
        let raw = self
            .templates
            .resolve(&path, args, args.module(), args.path_hint())?;

        let message = if self.settings.truthy("email_html") {
            let shell = self.hooks.html_shell.apply(DEFAULT_HTML_SHELL.to_string());
            let attrs = self.hooks.body_attrs.apply(DEFAULT_BODY_ATTRS.to_string());
            let pre = self.hooks.pre_body.apply(String::new());
            let post = self.hooks.post_body.apply(String::new());
            format!("{shell}\n<body {attrs}>\n{pre}{raw}{post}\n</body>\n</html>")
        } else {
            let stripped = text::strip_tags(&raw);
            if stripped == raw {
                stripped
            } else {
                text::collapse_plain_text(&stripped)
            }
        };

        let message = self.hooks.content.apply(message);
        self.placeholders.substitute(&message)
    }

    /// Compose and dispatch one notification.
    ///
    /// Fires exactly one `deliver` on success. Deliberately does nothing
    /// for an invalid recipient or a template whose `<key>_on` setting
    /// is not truthy.
    pub fn send(
        &mut self,
        recipient: &str,
        template: &str,
        args: &TemplateArgs,
    ) -> Result<(), MailError> {
        if !address::is_valid(recipient) {
            tracing::debug!(recipient, "mail skipped: invalid recipient address");
            return Ok(());
        }
        if !self.settings.truthy(&format!("{template}_on")) {
            tracing::debug!(template, "mail skipped: template disabled");
            return Ok(());
        }

        let event = SendEvent {
            recipient: recipient.to_string(),
            template: template.to_string(),
        };
        self.hooks.before_send.emit(&event);

        let from_name = self.settings.text("mail_from").unwrap_or_default();
        let from_addr = self.settings.text("mail_from_addr").unwrap_or_default();
        let mut headers = vec![format!("From: {from_name} <{from_addr}>")];

        let subject = self
            .settings
            .text(&format!("{template}_sub"))
            .unwrap_or_default();
        let subject = self.hooks.subject.apply(subject);
        let subject = self.placeholders.substitute(&subject)?;
        let subject = text::decode_entities(&subject);

        let body = self.render(template, args)?;

        headers.push(if self.html_mode() {
            "Content-Type: text/html".to_string()
        } else {
            "Content-Type: text/plain".to_string()
        });

        self.transport.deliver(Envelope {
            recipient: recipient.to_string(),
            subject,
            body,
            headers,
            attachments: Vec::new(),
        });

        self.hooks.after_send.emit(&event);
        Ok(())
    }
}
