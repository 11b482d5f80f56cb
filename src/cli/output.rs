//! Plain-text rendering for command results. Everything here goes to stdout.

use scholaris_models::{AcademyId, AcademyMembership, Class, Resource};

use crate::guard::{GuardDecision, RenderTarget};
use crate::hooks::HookState;
use crate::membership::DirectoryResult;
use crate::session::{Session, SessionState};
use crate::toast::Toast;

pub(crate) fn user_line(session: &Session) -> String {
    match &session.user {
        Some(user) => {
            let role = session.role.map_or("unknown role", |r| r.display_name());
            format!("{} <{}> ({role})", user.full_name(), user.email)
        }
        None => "nobody".to_string(),
    }
}

pub(crate) fn print_session(session: &Session, active: Option<AcademyId>) {
    match session.state() {
        SessionState::Loading => println!("Session is still loading"),
        SessionState::Unauthenticated => println!("Not signed in"),
        SessionState::PendingApproval => {
            println!("{} - awaiting approval", user_line(session));
        }
        SessionState::Authenticated(_) => {
            println!("{}", user_line(session));
            if !session.memberships.is_empty() {
                print_memberships(&session.memberships, active);
            }
        }
    }
}

pub(crate) fn print_memberships(memberships: &[AcademyMembership], active: Option<AcademyId>) {
    if memberships.is_empty() {
        println!("No memberships");
        return;
    }
    for m in memberships {
        let marker = if Some(m.academy_id) == active { "*" } else { " " };
        println!(
            "{marker} {:<9} {}  academy={}  membership={}  requested={}",
            m.status.as_str(),
            m.academy_name,
            m.academy_id,
            m.id,
            m.requested_at.format("%Y-%m-%d")
        );
    }
}

pub(crate) fn print_decision(path: &str, decision: &GuardDecision) {
    match decision {
        GuardDecision::Loading => println!("{path}: loading"),
        GuardDecision::Render(RenderTarget::Requested) => println!("{path}: render"),
        GuardDecision::Render(RenderTarget::PendingApproval) => {
            println!("{path}: render pending-approval view")
        }
        GuardDecision::Redirect { to, return_to } => match return_to {
            Some(back) => println!("{path}: redirect to {to} (return to {back})"),
            None => println!("{path}: redirect to {to}"),
        },
    }
}

pub(crate) fn print_directory(result: &DirectoryResult) {
    if !result.success {
        return;
    }
    for entry in &result.data {
        println!("{}  {}", entry.academy_id, entry.name);
        if let Some(description) = entry.description.as_deref().filter(|d| !d.is_empty()) {
            println!("    {description}");
        }
    }
    if let Some(meta) = &result.meta {
        println!(
            "page {}/{} ({} academies)",
            meta.current_page, meta.total_pages, meta.total
        );
    }
}

pub(crate) fn print_classes(state: &HookState<Class>) {
    if state.error.is_some() {
        return;
    }
    if state.data.is_empty() {
        println!("No classes");
    }
    for class in &state.data {
        println!(
            "{}  {}  ({} students)",
            class.id,
            class.name,
            class.student_ids.len()
        );
    }
}

pub(crate) fn print_resources(state: &HookState<Resource>) {
    if state.error.is_some() {
        return;
    }
    if state.data.is_empty() {
        println!("No resources");
    }
    for resource in &state.data {
        println!(
            "{}  [{:?}] {}  {}",
            resource.id,
            resource.visibility,
            resource.title,
            resource.url.as_deref().unwrap_or("")
        );
    }
}

/// Toasts go to stderr so they never mix with command output.
pub fn print_toasts(toasts: &[Toast]) {
    for toast in toasts {
        match &toast.description {
            Some(description) => {
                eprintln!("[{}] {}: {description}", toast.status.as_str(), toast.title)
            }
            None => eprintln!("[{}] {}", toast.status.as_str(), toast.title),
        }
    }
}
