use scholaris::guard::{GuardDecision, RenderTarget, RouteGuard, home_route};
use scholaris::scholaris_models::{CurrentUser, Role, UserId};
use scholaris::session::Session;

const PATHS: [&str; 5] = [
    "/",
    "/dashboard",
    "/teacher/classes",
    "/academy/settings",
    "/student/resources?page=2",
];

fn required_roles() -> Vec<Option<Role>> {
    std::iter::once(None)
        .chain(Role::ALL.into_iter().map(Some))
        .collect()
}

fn create_test_session(role: Role, pending: bool) -> Session {
    Session::authenticated(
        CurrentUser {
            id: UserId::new(),
            email: "test@example.com".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role: role.as_str().to_string(),
            is_pending: pending,
            academy_id: None,
            phone: None,
            photo_url: None,
        },
        vec![],
    )
}

#[test]
fn test_loading_session_always_loading() {
    let mut sessions = vec![Session::loading()];
    for role in Role::ALL {
        let mut session = create_test_session(role, false);
        session.is_loading = true;
        sessions.push(session);
    }

    for session in &sessions {
        for required in required_roles() {
            for path in PATHS {
                assert_eq!(
                    RouteGuard::evaluate(session, required, path),
                    GuardDecision::Loading
                );
            }
        }
    }
}

#[test]
fn test_unauthenticated_always_redirects_to_login() {
    let session = Session::unauthenticated();
    for required in required_roles() {
        for path in PATHS {
            match RouteGuard::evaluate(&session, required, path) {
                GuardDecision::Redirect { to, return_to } => {
                    assert_eq!(to, "/login");
                    assert_eq!(return_to.as_deref(), Some(path));
                }
                other => panic!("expected redirect for {path}, got {other:?}"),
            }
        }
    }
}

#[test]
fn test_matching_role_renders() {
    for role in Role::ALL {
        let session = create_test_session(role, false);
        assert_eq!(
            RouteGuard::evaluate(&session, Some(role), "/anything"),
            GuardDecision::Render(RenderTarget::Requested)
        );
    }
}

#[test]
fn test_mismatched_role_redirects_to_own_home() {
    for actual in Role::ALL {
        let session = create_test_session(actual, false);
        for required in Role::ALL.into_iter().filter(|r| *r != actual) {
            assert_eq!(
                RouteGuard::evaluate(&session, Some(required), "/somewhere"),
                GuardDecision::Redirect {
                    to: home_route(Some(actual)).to_string(),
                    return_to: None
                }
            );
        }
    }
}

#[test]
fn test_teacher_on_owner_page_goes_to_teacher_dashboard() {
    let session = create_test_session(Role::Teacher, false);
    assert_eq!(
        RouteGuard::evaluate(&session, Some(Role::AcademyOwner), "/academy/dashboard"),
        GuardDecision::Redirect {
            to: "/teacher/dashboard".to_string(),
            return_to: None
        }
    );
}

#[test]
fn test_pending_renders_pending_view_for_any_requirement() {
    for role in Role::ALL {
        let session = create_test_session(role, true);
        for required in required_roles() {
            assert_eq!(
                RouteGuard::evaluate(&session, required, "/teacher/classes"),
                GuardDecision::Render(RenderTarget::PendingApproval)
            );
        }
    }
}

#[test]
fn test_no_required_role_renders_for_any_role() {
    for role in Role::ALL {
        let session = create_test_session(role, false);
        assert_eq!(
            RouteGuard::evaluate(&session, None, "/profile"),
            GuardDecision::Render(RenderTarget::Requested)
        );
    }
}

#[test]
fn test_home_route_is_pure() {
    for role in Role::ALL {
        assert_eq!(home_route(Some(role)), home_route(Some(role)));
        assert!(home_route(Some(role)).ends_with("/dashboard"));
    }
}

#[test]
fn test_navigate_landing_does_not_bypass_pending() {
    let session = create_test_session(Role::Student, true);
    assert_eq!(
        RouteGuard::navigate(&session, None, "/"),
        GuardDecision::Render(RenderTarget::PendingApproval)
    );
}

#[test]
fn test_navigate_landing_sends_to_home() {
    let session = create_test_session(Role::AcademyOwner, false);
    assert_eq!(
        RouteGuard::navigate(&session, None, "/login"),
        GuardDecision::Redirect {
            to: "/academy/dashboard".to_string(),
            return_to: None
        }
    );
    assert_eq!(
        RouteGuard::navigate(&session, None, "/academy/dashboard"),
        GuardDecision::Render(RenderTarget::Requested)
    );
}
