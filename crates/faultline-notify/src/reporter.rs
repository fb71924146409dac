//! Exception reporter use case
//!
//! Orchestrates the full handling of one fault event: render the scrubbed
//! report, write it to the log sink, update the occurrence record, and decide
//! whether administrators get an email. All failures are contained: reporting
//! an exception must never raise a new one, so the public entry point returns
//! a plain `bool` and routes internal errors to stderr.

use faultline_capture::render_report;
use faultline_core::config::{ScrubConfig, SiteConfig};
use faultline_core::domain::{synthetic_event, AdminNotifyPolicy, FaultEvent, Severity};
use faultline_core::ports::{ILogSink, IMailTransport, IOccurrenceStore};
use std::future::Future;
use std::sync::Arc;

/// Per-call options for `ExceptionReporter::register`.
#[derive(Debug, Clone)]
pub struct RegisterOptions {
    /// Which log channel receives the report
    pub severity: Severity,
    /// Escalate to email even when the policy alone would not
    pub alert_admin: bool,
    /// Replaces the generated mail subject; the site URL is still appended
    pub subject: Option<String>,
    /// Free-form text prepended to the rendered report
    pub prefix: Option<String>,
    /// Free-form text appended to the rendered report
    pub suffix: Option<String>,
}

impl Default for RegisterOptions {
    fn default() -> Self {
        Self {
            severity: Severity::Error,
            alert_admin: false,
            subject: None,
            prefix: None,
            suffix: None,
        }
    }
}

impl RegisterOptions {
    pub fn warning() -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::default()
        }
    }

    pub fn alert_admin(mut self) -> Self {
        self.alert_admin = true;
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }
}

/// Use case: register fault events and notify administrators.
pub struct ExceptionReporter {
    log_sink: Arc<dyn ILogSink>,
    mail: Arc<dyn IMailTransport>,
    occurrences: Arc<dyn IOccurrenceStore>,
    site: SiteConfig,
    policy: AdminNotifyPolicy,
    scrub: ScrubConfig,
}

impl ExceptionReporter {
    pub fn new(
        log_sink: Arc<dyn ILogSink>,
        mail: Arc<dyn IMailTransport>,
        occurrences: Arc<dyn IOccurrenceStore>,
        site: SiteConfig,
        policy: AdminNotifyPolicy,
        scrub: ScrubConfig,
    ) -> Self {
        Self {
            log_sink,
            mail,
            occurrences,
            site,
            policy,
            scrub,
        }
    }

    /// Registers a fault event. Returns whether registration succeeded.
    ///
    /// An event that renders to an empty report (no kind, no frames) is
    /// dropped without side effects and yields `false`. Never returns an
    /// error: any failure inside the reporting machinery is written to
    /// stderr and swallowed.
    pub async fn register(&self, event: FaultEvent, options: RegisterOptions) -> bool {
        match self.try_register(&event, &options).await {
            Ok(registered) => registered,
            Err(err) => {
                eprintln!(
                    "Error in registering exception to '{}': '{}'",
                    self.log_sink.describe(options.severity),
                    err
                );
                false
            }
        }
    }

    /// Registers a synthetic fault raised at the caller's source location.
    ///
    /// `#[track_caller]` pins the captured frame to the call site, so the
    /// event must be built before the returned future is polled.
    #[track_caller]
    pub fn raise(
        &self,
        kind: &str,
        message: &str,
        options: RegisterOptions,
    ) -> impl Future<Output = bool> + '_ {
        let event = synthetic_event(kind, message);
        self.register(event, options)
    }

    async fn try_register(
        &self,
        event: &FaultEvent,
        options: &RegisterOptions,
    ) -> anyhow::Result<bool> {
        let mut report = render_report(event, &self.scrub);
        // An event with no kind and no frames renders to nothing; there is no
        // report to log, no signature worth recording, nothing to mail.
        if report.is_empty() {
            tracing::debug!("empty fault event, nothing to register");
            return Ok(false);
        }
        if let Some(prefix) = &options.prefix {
            report = format!("{}\n{}", prefix, report);
        }
        if let Some(suffix) = &options.suffix {
            report = format!("{}\n{}", report, suffix);
        }

        let written_to_log = match self.log_sink.write(options.severity, &report).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "log sink write failed, falling back to email");
                false
            }
        };

        let signature = event.signature();
        let record = self.occurrences.get_or_create(&signature).await?;

        let must_mail = record.should_notify
            && (self.policy == AdminNotifyPolicy::Always
                || (options.alert_admin && self.policy != AdminNotifyPolicy::Disabled)
                || !written_to_log);

        if must_mail {
            let (file, line, function) = event.location();
            let subject = options
                .subject
                .clone()
                .unwrap_or_else(|| format!("Exception ({}:{}:{})", file, line, function));
            let subject = format!("{} at {}", subject, self.site.url);

            let mut body = format!("\n{}\n\n{}", record.pretty_info, report);
            if !written_to_log {
                body.push_str(&format!(
                    "\n\nN.B. it was impossible to log this exception into {}",
                    self.log_sink.describe(options.severity)
                ));
            }

            self.mail
                .send(&self.site.admin_email, &self.site.admin_email, &subject, &body)
                .await?;
            self.occurrences.mark_notified(&signature).await?;
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occurrence::MemoryOccurrenceStore;
    use faultline_core::domain::FrameSnapshot;
    use std::sync::Mutex;

    struct MockSink {
        fail: bool,
        writes: Mutex<Vec<(Severity, String)>>,
    }

    impl MockSink {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                writes: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl ILogSink for MockSink {
        async fn write(&self, severity: Severity, text: &str) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("disk full");
            }
            self.writes
                .lock()
                .unwrap()
                .push((severity, text.to_string()));
            Ok(())
        }

        fn describe(&self, severity: Severity) -> String {
            format!("mock.{}", severity.file_extension())
        }
    }

    struct MockMailer {
        fail: bool,
        sent: Mutex<Vec<(String, String, String)>>,
    }

    impl MockMailer {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                sent: Mutex::new(Vec::new()),
            })
        }

        fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl IMailTransport for MockMailer {
        async fn send(
            &self,
            _from: &str,
            to: &str,
            subject: &str,
            body: &str,
        ) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("relay unreachable");
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    fn site() -> SiteConfig {
        SiteConfig {
            name: "Testsite".to_string(),
            url: "http://test.local".to_string(),
            admin_email: "admin@test.local".to_string(),
            support_email: "support@test.local".to_string(),
        }
    }

    fn reporter(
        sink: Arc<MockSink>,
        mailer: Arc<MockMailer>,
        policy: AdminNotifyPolicy,
    ) -> ExceptionReporter {
        ExceptionReporter::new(
            sink,
            mailer,
            Arc::new(MemoryOccurrenceStore::new()),
            site(),
            policy,
            ScrubConfig::default(),
        )
    }

    fn event() -> FaultEvent {
        FaultEvent::new("ValueError", "bad input")
            .with_frame(FrameSnapshot::new("handle", "/srv/app.rs", 10))
    }

    #[tokio::test]
    async fn test_register_writes_report_without_mail() {
        let sink = MockSink::new(false);
        let mailer = MockMailer::new(false);
        let reporter = reporter(sink.clone(), mailer.clone(), AdminNotifyPolicy::FirstOnly);

        assert!(reporter.register(event(), RegisterOptions::default()).await);

        let writes = sink.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, Severity::Error);
        assert!(writes[0].1.contains("ValueError: bad input"));
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_alert_admin_mails_first_occurrence_only() {
        let sink = MockSink::new(false);
        let mailer = MockMailer::new(false);
        let reporter = reporter(sink, mailer.clone(), AdminNotifyPolicy::FirstOnly);

        let options = RegisterOptions::default().alert_admin();
        assert!(reporter.register(event(), options.clone()).await);
        assert!(reporter.register(event(), options).await);

        assert_eq!(mailer.sent_count(), 1);
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent[0].0, "admin@test.local");
        assert_eq!(
            sent[0].1,
            "Exception (app.rs:10:handle) at http://test.local"
        );
    }

    #[tokio::test]
    async fn test_policy_always_mails_every_occurrence() {
        let sink = MockSink::new(false);
        let mailer = MockMailer::new(false);
        let reporter = reporter(sink, mailer.clone(), AdminNotifyPolicy::Always);

        reporter.register(event(), RegisterOptions::default()).await;
        // Second occurrence: should_notify was reset by mark_notified, so
        // only the first mails. A fresh signature mails again.
        reporter.register(event(), RegisterOptions::default()).await;
        assert_eq!(mailer.sent_count(), 1);

        let other = FaultEvent::new("IOError", "gone")
            .with_frame(FrameSnapshot::new("load", "/srv/io.rs", 3));
        reporter.register(other, RegisterOptions::default()).await;
        assert_eq!(mailer.sent_count(), 2);
    }

    #[tokio::test]
    async fn test_policy_disabled_suppresses_alert_admin() {
        let sink = MockSink::new(false);
        let mailer = MockMailer::new(false);
        let reporter = reporter(sink, mailer.clone(), AdminNotifyPolicy::Disabled);

        let options = RegisterOptions::default().alert_admin();
        assert!(reporter.register(event(), options).await);
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_log_failure_falls_back_to_mail() {
        let sink = MockSink::new(true);
        let mailer = MockMailer::new(false);
        let reporter = reporter(sink, mailer.clone(), AdminNotifyPolicy::Disabled);

        assert!(reporter.register(event(), RegisterOptions::default()).await);

        assert_eq!(mailer.sent_count(), 1);
        let sent = mailer.sent.lock().unwrap();
        assert!(sent[0].2.contains("impossible to log this exception into mock.err"));
    }

    #[tokio::test]
    async fn test_total_failure_returns_false() {
        let sink = MockSink::new(true);
        let mailer = MockMailer::new(true);
        let reporter = reporter(sink, mailer, AdminNotifyPolicy::FirstOnly);

        assert!(!reporter.register(event(), RegisterOptions::default()).await);
    }

    #[tokio::test]
    async fn test_subject_override() {
        let sink = MockSink::new(false);
        let mailer = MockMailer::new(false);
        let reporter = reporter(sink, mailer.clone(), AdminNotifyPolicy::Always);

        let options = RegisterOptions::default().with_subject("Custom alert");
        reporter.register(event(), options).await;

        // The site URL is appended to overridden subjects too.
        assert_eq!(
            mailer.sent.lock().unwrap()[0].1,
            "Custom alert at http://test.local"
        );
    }

    #[tokio::test]
    async fn test_empty_event_is_dropped_without_side_effects() {
        let sink = MockSink::new(false);
        let mailer = MockMailer::new(false);
        let reporter = reporter(sink.clone(), mailer.clone(), AdminNotifyPolicy::Always);

        assert!(!reporter.register(FaultEvent::none(), RegisterOptions::default()).await);

        assert!(sink.writes.lock().unwrap().is_empty());
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_event_skips_mail_even_when_log_sink_fails() {
        let sink = MockSink::new(true);
        let mailer = MockMailer::new(false);
        let reporter = reporter(sink, mailer.clone(), AdminNotifyPolicy::Always);

        assert!(!reporter.register(FaultEvent::none(), RegisterOptions::default()).await);
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_mail_body_carries_recurrence_summary() {
        let sink = MockSink::new(false);
        let mailer = MockMailer::new(false);
        let reporter = reporter(sink, mailer.clone(), AdminNotifyPolicy::Always);

        reporter.register(event(), RegisterOptions::default()).await;

        let sent = mailer.sent.lock().unwrap();
        assert!(sent[0].2.contains("ValueError (app.rs:10) has been seen 1 time(s)"));
        assert!(sent[0].2.contains("ValueError: bad input"));
    }

    #[tokio::test]
    async fn test_prefix_and_suffix_wrap_logged_report() {
        let sink = MockSink::new(false);
        let mailer = MockMailer::new(false);
        let reporter = reporter(sink.clone(), mailer, AdminNotifyPolicy::FirstOnly);

        let options = RegisterOptions::default()
            .with_prefix("While processing request 42:")
            .with_suffix("(end of report)");
        assert!(reporter.register(event(), options).await);

        let writes = sink.writes.lock().unwrap();
        assert!(writes[0].1.starts_with("While processing request 42:\n"));
        assert!(writes[0].1.ends_with("\n(end of report)"));
    }

    #[tokio::test]
    async fn test_raise_captures_this_file() {
        let sink = MockSink::new(false);
        let mailer = MockMailer::new(false);
        let reporter = reporter(sink.clone(), mailer, AdminNotifyPolicy::FirstOnly);

        assert!(
            reporter
                .raise("ForcedError", "forced for testing", RegisterOptions::warning())
                .await
        );

        let writes = sink.writes.lock().unwrap();
        assert_eq!(writes[0].0, Severity::Warning);
        assert!(writes[0].1.contains("reporter.rs"));
        assert!(writes[0].1.contains("ForcedError: forced for testing"));
    }
}
