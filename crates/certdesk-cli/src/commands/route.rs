use certdesk_core::routing::GuardDecision;

use crate::bootstrap::App;

pub fn check(app: &App, path: &str) {
    let resolved = app.guard.table().resolve(path);
    let session = app.controller.state().snapshot();

    match app.guard.check(path, &session.user) {
        GuardDecision::Allow => println!("allow {}", resolved.path),
        GuardDecision::Redirect(redirect) => {
            println!("redirect {} -> {}", resolved.path, redirect.path())
        }
    }
}
