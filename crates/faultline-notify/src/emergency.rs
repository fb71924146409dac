//! Emergency notification
//!
//! Fans one message out to every recipient currently on call. Unlike regular
//! exception registration, delivery failures propagate to the caller: an
//! emergency that silently fails to send is worse than an error.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use faultline_core::config::SiteConfig;
use faultline_core::ports::IMailTransport;

use crate::schedule::EmergencySchedule;

const EMERGENCY_SUBJECT: &str = "Emergency notification";

/// Sends `message` to everyone on call at `now`.
///
/// Recipients come from the schedule unless an explicit list is given; the
/// site administrator is always included either way. One mail is sent per
/// recipient, from the support address.
pub async fn register_emergency(
    mail: &dyn IMailTransport,
    schedule: &EmergencySchedule,
    site: &SiteConfig,
    now: NaiveDateTime,
    message: &str,
    recipients: Option<&[String]>,
) -> anyhow::Result<()> {
    let recipients: BTreeSet<String> = match recipients {
        Some(explicit) => {
            let mut set: BTreeSet<String> = explicit.iter().cloned().collect();
            set.insert(site.admin_email.clone());
            set
        }
        None => schedule.resolve_recipients(now, &site.admin_email),
    };

    tracing::info!(count = recipients.len(), "sending emergency notification");
    for recipient in &recipients {
        mail.send(&site.support_email, recipient, EMERGENCY_SUBJECT, message)
            .await?;
    }
    Ok(())
}
