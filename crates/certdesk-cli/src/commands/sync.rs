use certdesk_core::records::NoticeId;
use certdesk_core::session::Session;

use crate::bootstrap::App;

pub async fn sync(app: &App) {
    app.sync.fetch_initial_data(&app.navigator).await;
    print_session(&app.controller.state().snapshot());
}

pub async fn read(app: &App, notice_id: NoticeId) {
    app.sync.mark_notice_read(notice_id, &app.navigator).await;
    print_session(&app.controller.state().snapshot());
}

fn print_session(session: &Session) {
    if !session.is_logged_in() {
        println!("Not logged in");
        return;
    }
    println!("Sync status: {:?}", session.sync_status);
    if let Some(at) = session.last_synced_at {
        println!("Last synced: {}", at.to_rfc3339());
    }

    println!("Notices ({}):", session.notices.len());
    for notice in &session.notices {
        let marker = if notice.read { " " } else { "*" };
        println!("  {} [{}] {}", marker, notice.id, notice.title);
    }

    for (label, certificates) in [
        ("My certificates", &session.certificates),
        ("Pending review", &session.certificates_pending_review),
    ] {
        if certificates.is_empty() {
            continue;
        }
        println!("{} ({}):", label, certificates.len());
        for certificate in certificates {
            let status = certificate.status.as_deref().unwrap_or("-");
            println!("  [{}] {} ({})", certificate.id, certificate.title, status);
        }
    }
}
