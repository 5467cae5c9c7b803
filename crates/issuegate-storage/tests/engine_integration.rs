//! End-to-end tests: the decision engine over the in-memory store.
//!
//! One fixture world per test: a support project with a three-state
//! workflow (new -> in progress -> resolved), a support group, and the
//! usual cast of author, assignee, teammate, outsider, and admin.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use issuegate_domain::model::{
    Group, GroupId, Issue, IssueId, Project, ProjectId, ResponsiblePolicy, State, StateId,
    StateKind, SystemRole, Template, TemplateId, TemplatePermission, User, UserId,
};
use issuegate_domain::voter::{DecisionEngine, EngineConfig};
use issuegate_storage::MemoryTrackerStore;

const AUTHOR: u64 = 1;
const ASSIGNEE: u64 = 2;
const TEAMMATE: u64 = 3;
const OUTSIDER: u64 = 4;
const ADMIN: u64 = 9;
const SUPPORT_GROUP: u64 = 7;

struct World {
    store: Arc<MemoryTrackerStore>,
    template: Template,
    new_state: State,
    in_progress: State,
    resolved: State,
}

fn user(id: u64) -> User {
    User {
        id: UserId::new(id),
        fullname: format!("user {id}"),
        email: format!("u{id}@example.com"),
        is_admin: id == ADMIN,
        is_disabled: false,
    }
}

fn world() -> World {
    let store = MemoryTrackerStore::new_shared();

    let project = Project {
        id: ProjectId::new(1),
        name: "Support".to_string(),
        is_suspended: false,
    };
    store.put_project(&project);

    let template = Template {
        id: TemplateId::new(1),
        project,
        name: "Ticket".to_string(),
        is_locked: false,
        initial_state_id: Some(StateId::new(10)),
        frozen_time_days: None,
    };
    store.put_template(&template).unwrap();

    let new_state = State {
        id: StateId::new(10),
        template: template.clone(),
        name: "New".to_string(),
        kind: StateKind::Initial,
        responsible_policy: ResponsiblePolicy::Keep,
    };
    let in_progress = State {
        id: StateId::new(11),
        template: template.clone(),
        name: "In progress".to_string(),
        kind: StateKind::Normal,
        responsible_policy: ResponsiblePolicy::Assign,
    };
    let resolved = State {
        id: StateId::new(13),
        template: template.clone(),
        name: "Resolved".to_string(),
        kind: StateKind::Final,
        responsible_policy: ResponsiblePolicy::Remove,
    };
    store.put_state(&new_state).unwrap();
    store.put_state(&in_progress).unwrap();
    store.put_state(&resolved).unwrap();

    for id in [AUTHOR, ASSIGNEE, TEAMMATE, OUTSIDER, ADMIN] {
        store.put_user(&user(id));
    }
    store.put_group(&Group {
        id: GroupId::new(SUPPORT_GROUP),
        project_id: Some(ProjectId::new(1)),
        name: "support team".to_string(),
    });
    store
        .add_group_member(GroupId::new(SUPPORT_GROUP), UserId::new(TEAMMATE))
        .unwrap();

    store.grant_role_permission(
        template.id,
        SystemRole::Anyone,
        TemplatePermission::AddComments,
    );
    store.grant_role_permission(
        template.id,
        SystemRole::Author,
        TemplatePermission::EditIssues,
    );
    store.grant_group_permission(
        template.id,
        GroupId::new(SUPPORT_GROUP),
        TemplatePermission::ViewIssues,
    );
    store.grant_group_permission(
        template.id,
        GroupId::new(SUPPORT_GROUP),
        TemplatePermission::CreateIssues,
    );

    store
        .add_role_transition(new_state.id, SystemRole::Anyone, &in_progress)
        .unwrap();
    store
        .add_group_transition(in_progress.id, GroupId::new(SUPPORT_GROUP), &resolved)
        .unwrap();
    store.add_responsible_group(in_progress.id, GroupId::new(SUPPORT_GROUP));

    World {
        store,
        template,
        new_state,
        in_progress,
        resolved,
    }
}

fn issue_in(state: &State, id: u64) -> Issue {
    Issue {
        id: IssueId::new(id),
        subject: format!("issue {id}"),
        author: UserId::new(AUTHOR),
        responsible: Some(UserId::new(ASSIGNEE)),
        state: state.clone(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        closed_at: None,
        is_suspended: false,
    }
}

#[tokio::test]
async fn author_views_without_grants_others_need_the_table() {
    let world = world();
    let subject = issue_in(&world.new_state, 100);
    world.store.put_issue(&subject).unwrap();

    let engine = DecisionEngine::new(Arc::clone(&world.store));
    assert!(engine.can_view_issue(&subject, &user(AUTHOR)).await.unwrap());
    assert!(engine
        .can_view_issue(&subject, &user(ASSIGNEE))
        .await
        .unwrap());
    assert!(engine
        .can_view_issue(&subject, &user(TEAMMATE))
        .await
        .unwrap());
    assert!(!engine
        .can_view_issue(&subject, &user(OUTSIDER))
        .await
        .unwrap());
}

#[tokio::test]
async fn create_follows_group_grant_and_template_gates() {
    let world = world();
    let engine = DecisionEngine::new(Arc::clone(&world.store));

    assert!(engine
        .can_create_issue(&world.template, &user(TEAMMATE))
        .await
        .unwrap());
    assert!(!engine
        .can_create_issue(&world.template, &user(OUTSIDER))
        .await
        .unwrap());

    let mut locked = world.template.clone();
    locked.is_locked = true;
    assert!(!engine
        .can_create_issue(&locked, &user(TEAMMATE))
        .await
        .unwrap());
}

#[tokio::test]
async fn open_dependency_blocks_the_final_state_until_closed() {
    let world = world();
    let subject = issue_in(&world.in_progress, 100);
    let mut dependency = issue_in(&world.new_state, 101);
    world.store.put_issue(&subject).unwrap();
    world.store.put_issue(&dependency).unwrap();
    world
        .store
        .add_dependency(subject.id, dependency.id)
        .unwrap();

    let engine = DecisionEngine::new(Arc::clone(&world.store));
    assert!(
        !engine
            .can_change_state(&subject, &user(TEAMMATE), &world.resolved)
            .await
            .unwrap(),
        "open dependency blocks the transition into the final state"
    );

    dependency.state = world.resolved.clone();
    dependency.closed_at = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
    world.store.put_issue(&dependency).unwrap();

    assert!(
        engine
            .can_change_state(&subject, &user(TEAMMATE), &world.resolved)
            .await
            .unwrap(),
        "closed dependency releases the transition"
    );
}

#[tokio::test]
async fn transition_listing_unions_role_and_group_edges() {
    let world = world();
    let subject = issue_in(&world.new_state, 100);
    world.store.put_issue(&subject).unwrap();
    world
        .store
        .add_group_transition(
            world.new_state.id,
            GroupId::new(SUPPORT_GROUP),
            &world.resolved,
        )
        .unwrap();

    let engine = DecisionEngine::new(Arc::clone(&world.store));

    let for_teammate = engine
        .transitions_for(&subject, &user(TEAMMATE))
        .await
        .unwrap();
    let ids: Vec<u64> = for_teammate.iter().map(|s| s.id.get()).collect();
    assert_eq!(ids, vec![11, 13], "role edge plus group edge, by id");

    let for_outsider = engine
        .transitions_for(&subject, &user(OUTSIDER))
        .await
        .unwrap();
    let ids: Vec<u64> = for_outsider.iter().map(|s| s.id.get()).collect();
    assert_eq!(ids, vec![11], "outsider only sees the anyone edge");
}

#[tokio::test]
async fn reassignment_respects_responsible_group_eligibility() {
    let world = world();
    world.store.grant_role_permission(
        world.template.id,
        SystemRole::Responsible,
        TemplatePermission::ReassignIssues,
    );
    let subject = issue_in(&world.in_progress, 100);
    world.store.put_issue(&subject).unwrap();

    let engine = DecisionEngine::new(Arc::clone(&world.store));
    assert!(engine
        .can_reassign_issue_to(&subject, &user(ASSIGNEE), &user(TEAMMATE))
        .await
        .unwrap());
    assert!(
        !engine
            .can_reassign_issue_to(&subject, &user(ASSIGNEE), &user(OUTSIDER))
            .await
            .unwrap(),
        "outsider is not in the state's responsible groups"
    );
}

#[tokio::test]
async fn zero_attachment_size_disables_attachments() {
    let world = world();
    world.store.grant_role_permission(
        world.template.id,
        SystemRole::Anyone,
        TemplatePermission::AttachFiles,
    );
    let subject = issue_in(&world.new_state, 100);
    world.store.put_issue(&subject).unwrap();

    let disabled = DecisionEngine::with_config(
        Arc::clone(&world.store),
        EngineConfig {
            max_attachment_mb: 0,
        },
    );
    assert!(!disabled
        .can_attach_file(&subject, &user(TEAMMATE))
        .await
        .unwrap());

    let enabled = DecisionEngine::new(Arc::clone(&world.store));
    assert!(enabled
        .can_attach_file(&subject, &user(TEAMMATE))
        .await
        .unwrap());
}

#[tokio::test]
async fn permission_cache_is_scoped_to_one_engine() {
    let world = world();
    let subject = issue_in(&world.new_state, 100);
    world.store.put_issue(&subject).unwrap();

    let stale_engine = DecisionEngine::new(Arc::clone(&world.store));
    assert!(!stale_engine
        .can_view_issue(&subject, &user(OUTSIDER))
        .await
        .unwrap());

    // An administrator grants the outsider's group view access
    // mid-flight.
    world.store.put_group(&Group {
        id: GroupId::new(8),
        project_id: None,
        name: "auditors".to_string(),
    });
    world
        .store
        .add_group_member(GroupId::new(8), UserId::new(OUTSIDER))
        .unwrap();
    world.store.grant_group_permission(
        world.template.id,
        GroupId::new(8),
        TemplatePermission::ViewIssues,
    );

    assert!(
        !stale_engine
            .can_view_issue(&subject, &user(OUTSIDER))
            .await
            .unwrap(),
        "the old engine keeps its memoized answer for its request"
    );

    let fresh_engine = DecisionEngine::new(Arc::clone(&world.store));
    assert!(
        fresh_engine
            .can_view_issue(&subject, &user(OUTSIDER))
            .await
            .unwrap(),
        "a new request-scoped engine sees the new grant"
    );
}

#[tokio::test]
async fn admin_deletes_follow_existence_checks() {
    let world = world();
    let mut locked = world.template.clone();
    locked.is_locked = true;
    world.store.put_template(&locked).unwrap();

    let engine = DecisionEngine::new(Arc::clone(&world.store));

    // The project still owns a template.
    assert!(!engine
        .can_delete_project(&locked.project, &user(ADMIN))
        .await
        .unwrap());

    // The template has an issue once one is filed.
    assert!(engine
        .can_delete_template(&locked, &user(ADMIN))
        .await
        .unwrap());
    world.store.put_issue(&issue_in(&world.new_state, 100)).unwrap();
    assert!(!engine
        .can_delete_template(&locked, &user(ADMIN))
        .await
        .unwrap());

    // The issue's author is now referenced and protected.
    assert!(!engine
        .can_delete_user(&user(AUTHOR), &user(ADMIN))
        .await
        .unwrap());
    assert!(engine
        .can_delete_user(&user(OUTSIDER), &user(ADMIN))
        .await
        .unwrap());
}
