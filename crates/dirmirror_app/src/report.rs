use dirmirror_core::{AppViewModel, FailureReason, Notification, Phase};

/// Renders the current view as one status line for the terminal.
pub fn render(view: &AppViewModel) -> String {
    let phase_label = match view.phase {
        Phase::Idle => "Idle",
        Phase::Scanning => "Scanning",
        Phase::Mirroring => "Mirroring",
        Phase::Finished => "Finished",
        Phase::Failed => "Failed",
    };

    match (&view.notification, view.phase) {
        (Some(notification), Phase::Finished | Phase::Failed | Phase::Scanning) => {
            format!("[{}] {}", phase_label, notification_text(notification))
        }
        (_, Phase::Mirroring) => format!(
            "[{}] {} of {} files ({} skipped)",
            phase_label,
            view.processed,
            view.discovered.unwrap_or(0),
            view.skipped
        ),
        _ => format!("[{}]", phase_label),
    }
}

/// User-facing text for a notification. The two "nothing to mirror" cases
/// read differently so the user knows whether the source was reachable.
pub fn notification_text(notification: &Notification) -> String {
    match notification {
        Notification::Scanning { source } => format!("Scanning {source}"),
        Notification::Completed { ok, skipped, total } => {
            if *skipped == 0 {
                format!("Mirrored {ok} of {total} files")
            } else {
                format!("Mirrored {ok} of {total} files, {skipped} skipped")
            }
        }
        Notification::Failed { source, reason } => match reason {
            FailureReason::NoListing => format!(
                "No file listing found at {source}: add a files.json manifest or enable directory listing"
            ),
            FailureReason::EmptyList => format!("{source} was scanned but contains no files"),
            FailureReason::Cancelled => format!("Mirror of {source} cancelled"),
            FailureReason::Other(message) => format!("Mirror of {source} failed: {message}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{notification_text, render};
    use dirmirror_core::{AppViewModel, FailureReason, Notification, Phase};
    use pretty_assertions::assert_eq;

    fn failed(reason: FailureReason) -> Notification {
        Notification::Failed {
            source: "https://cdn.example.com/assets/".into(),
            reason,
        }
    }

    #[test]
    fn no_listing_and_empty_list_read_differently() {
        let no_listing = notification_text(&failed(FailureReason::NoListing));
        let empty = notification_text(&failed(FailureReason::EmptyList));
        assert!(no_listing.starts_with("No file listing found"));
        assert_eq!(
            empty,
            "https://cdn.example.com/assets/ was scanned but contains no files"
        );
    }

    #[test]
    fn completion_mentions_skips_only_when_present() {
        assert_eq!(
            notification_text(&Notification::Completed {
                ok: 3,
                skipped: 0,
                total: 3
            }),
            "Mirrored 3 of 3 files"
        );
        assert_eq!(
            notification_text(&Notification::Completed {
                ok: 2,
                skipped: 1,
                total: 3
            }),
            "Mirrored 2 of 3 files, 1 skipped"
        );
    }

    #[test]
    fn mirroring_view_shows_progress() {
        let view = AppViewModel {
            phase: Phase::Mirroring,
            discovered: Some(10),
            processed: 4,
            ok: 3,
            skipped: 1,
            ..AppViewModel::default()
        };
        assert_eq!(render(&view), "[Mirroring] 4 of 10 files (1 skipped)");
    }

    #[test]
    fn idle_view_has_only_the_phase() {
        assert_eq!(render(&AppViewModel::default()), "[Idle]");
    }
}
