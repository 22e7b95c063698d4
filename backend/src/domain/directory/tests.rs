//! Behavioural coverage for the directory facade.

use std::sync::Arc;

use pagination::{PageNumber, PageWindow};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorKind;
use crate::domain::Secret;
use crate::domain::ports::{
    DirectoryApiError, DirectoryGroup, DirectoryGroupMember, DirectoryPage, DirectoryUsage,
    DirectoryUser, EdgeProxyCredentials, MockDirectoryApi,
};

#[fixture]
fn settings() -> DirectorySettings {
    DirectorySettings {
        token: Secret::new("ak-token"),
        host: "auth.example.test".to_owned(),
        scheme: Scheme::Https,
        edge_proxy: None,
    }
}

fn service(settings: DirectorySettings, api: MockDirectoryApi) -> DirectoryService {
    DirectoryService::new(settings, Arc::new(api)).expect("valid settings")
}

fn group(pk: &str, name: &str) -> DirectoryGroup {
    DirectoryGroup {
        pk: pk.to_owned(),
        name: name.to_owned(),
        parent: None,
        members: Vec::new(),
    }
}

fn user(pk: i64, email: &str) -> DirectoryUser {
    DirectoryUser {
        pk,
        username: format!("user{pk}"),
        name: format!("User {pk}"),
        email: email.to_owned(),
    }
}

fn page_of(number: u32) -> PageNumber {
    PageNumber::new(number).expect("non-zero page")
}

#[rstest]
fn blank_token_is_a_configuration_error(mut settings: DirectorySettings) {
    settings.token = Secret::new("  ");
    let err = DirectoryService::new(settings, Arc::new(MockDirectoryApi::new()))
        .err()
        .expect("blank token rejected");
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(err.status(), 500);
}

#[rstest]
fn half_configured_edge_proxy_is_a_configuration_error(mut settings: DirectorySettings) {
    settings.edge_proxy = Some(EdgeProxyCredentials {
        client_id: "client".to_owned(),
        client_secret: Secret::new(""),
    });
    let err = DirectoryService::new(settings, Arc::new(MockDirectoryApi::new()))
        .err()
        .expect("half-configured proxy rejected");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[rstest]
#[tokio::test]
async fn list_users_starts_on_first_page_and_carries_the_token(settings: DirectorySettings) {
    let mut api = MockDirectoryApi::new();
    api.expect_list_users()
        .withf(|auth, page, size| {
            auth.token.expose() == "ak-token" && *page == PageNumber::FIRST && *size == 100
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(DirectoryPage {
                results: vec![user(7, "ada@example.com")],
                window: PageWindow::new(1, 3),
            })
        });

    let page = service(settings, api).list_users(None).await.expect("users");
    assert_eq!(
        page.items(),
        &[User {
            id: "7".to_owned(),
            email: "ada@example.com".to_owned(),
        }]
    );
    assert_eq!(page.next_cursor().as_str(), "2");
}

#[rstest]
#[tokio::test]
async fn list_users_rejects_non_numeric_cursor_without_calling_directory(
    settings: DirectorySettings,
) {
    let mut api = MockDirectoryApi::new();
    api.expect_list_users().never();

    let err = service(settings, api)
        .list_users(Some("abc"))
        .await
        .expect_err("cursor rejected");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.status(), 400);
}

#[rstest]
#[tokio::test]
async fn list_groups_on_last_page_returns_empty_cursor(settings: DirectorySettings) {
    let mut api = MockDirectoryApi::new();
    api.expect_list_groups()
        .withf(|_, page, _| *page == page_of(2))
        .times(1)
        .returning(|_, _, _| {
            Ok(DirectoryPage {
                results: vec![group("g-2", "ops")],
                window: PageWindow::new(2, 2),
            })
        });

    let page = service(settings, api)
        .list_groups(Some("2"))
        .await
        .expect("groups");
    assert!(page.next_cursor().is_end());
    assert_eq!(page.items()[0].id, "g-2");
    assert!(page.items()[0].description.is_none());
}

#[rstest]
#[tokio::test]
async fn following_cursors_visits_every_page_once(settings: DirectorySettings) {
    let mut api = MockDirectoryApi::new();
    api.expect_list_groups()
        .times(3)
        .returning(|_, page, _| {
            let current = page.get();
            Ok(DirectoryPage {
                results: vec![group(&format!("g-{current}"), "group")],
                window: PageWindow::new(current, 3),
            })
        });
    let service = service(settings, api);

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = service
            .list_groups(cursor.as_deref())
            .await
            .expect("groups");
        seen.extend(page.items().iter().map(|group| group.id.clone()));
        if page.next_cursor().is_end() {
            break;
        }
        cursor = Some(page.next_cursor().as_str().to_owned());
    }
    assert_eq!(seen, ["g-1", "g-2", "g-3"]);
}

#[rstest]
#[tokio::test]
async fn get_group_propagates_directory_status(settings: DirectorySettings) {
    let mut api = MockDirectoryApi::new();
    api.expect_retrieve_group()
        .withf(|_, pk, include_users| pk == "missing" && !*include_users)
        .returning(|_, _, _| Err(DirectoryApiError::status(404_u16, "Not found.")));

    let err = service(settings, api)
        .get_group("missing")
        .await
        .expect_err("group missing");
    assert_eq!(err.status(), 404);
    assert_eq!(err.message(), "failed to get group from Authentik");
}

#[rstest]
#[tokio::test]
async fn group_members_come_from_embedded_users(settings: DirectorySettings) {
    let mut api = MockDirectoryApi::new();
    api.expect_retrieve_group()
        .withf(|_, pk, include_users| pk == "grp1" && *include_users)
        .returning(|_, pk, _| {
            let mut fetched = group(pk, "engineering");
            fetched.members = vec![DirectoryGroupMember {
                pk: 42,
                username: "ada".to_owned(),
                email: "ada@example.com".to_owned(),
            }];
            Ok(fetched)
        });

    let members = service(settings, api)
        .list_group_members("grp1")
        .await
        .expect("members");
    assert_eq!(
        members,
        vec![GroupUser {
            user_id: "42".to_owned(),
            email: "ada@example.com".to_owned(),
        }]
    );
}

#[rstest]
#[tokio::test]
async fn member_groups_keep_only_group_usages(settings: DirectorySettings) {
    let mut api = MockDirectoryApi::new();
    api.expect_group_used_by()
        .withf(|_, pk| pk == "parent")
        .returning(|_, _| {
            Ok(vec![
                DirectoryUsage {
                    model_name: "group".to_owned(),
                    pk: "child".to_owned(),
                    name: "child".to_owned(),
                },
                DirectoryUsage {
                    model_name: "policybinding".to_owned(),
                    pk: "binding".to_owned(),
                    name: "binding".to_owned(),
                },
            ])
        });
    api.expect_retrieve_group()
        .withf(|_, pk, _| pk == "child")
        .times(1)
        .returning(|_, pk, _| Ok(group(pk, "child")));

    let groups = service(settings, api)
        .list_member_groups("parent")
        .await
        .expect("member groups");
    assert_eq!(
        groups,
        vec![GroupMemberGroup {
            group_id: "child".to_owned(),
        }]
    );
}

#[rstest]
#[tokio::test]
async fn remove_user_with_non_numeric_id_never_reaches_directory(settings: DirectorySettings) {
    let mut api = MockDirectoryApi::new();
    api.expect_remove_user().never();

    let err = service(settings, api)
        .remove_user_from_group("grp1", "notanumber")
        .await
        .expect_err("validation error");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.status(), 400);
}

#[rstest]
#[tokio::test]
async fn repeated_add_keeps_the_directory_error_category(settings: DirectorySettings) {
    let mut api = MockDirectoryApi::new();
    let mut calls = 0;
    api.expect_add_user()
        .withf(|_, pk, user_pk| pk == "grp1" && *user_pk == 42)
        .times(2)
        .returning(move |_, _, _| {
            calls += 1;
            if calls == 1 {
                Ok(())
            } else {
                Err(DirectoryApiError::status(400_u16, "user already in group"))
            }
        });
    let service = service(settings, api);

    service
        .add_user_to_group("grp1", "42")
        .await
        .expect("first add");
    let err = service
        .add_user_to_group("grp1", "42")
        .await
        .expect_err("duplicate add");
    assert_eq!(err.kind(), ErrorKind::Downstream);
    assert_eq!(err.status(), 400);
}

#[rstest]
#[tokio::test]
async fn nesting_sets_and_clears_the_member_parent(settings: DirectorySettings) {
    let mut api = MockDirectoryApi::new();
    api.expect_set_parent()
        .withf(|_, pk, parent| pk == "child" && parent.as_deref() == Some("parent"))
        .times(1)
        .returning(|_, _, _| Ok(()));
    api.expect_set_parent()
        .withf(|_, pk, parent| pk == "child" && parent.is_none())
        .times(1)
        .returning(|_, _, _| Ok(()));
    let service = service(settings, api);

    service
        .add_group_to_group("parent", "child")
        .await
        .expect("nest");
    service
        .remove_group_from_group("child")
        .await
        .expect("un-nest");
}

#[rstest]
#[tokio::test]
async fn edge_proxy_credentials_reach_every_call(mut settings: DirectorySettings) {
    settings.edge_proxy = Some(EdgeProxyCredentials {
        client_id: "cf-id".to_owned(),
        client_secret: Secret::new("cf-secret"),
    });
    let mut api = MockDirectoryApi::new();
    api.expect_retrieve_group()
        .withf(|auth, _, _| {
            auth.edge_proxy.as_ref().is_some_and(|proxy| {
                proxy.client_id == "cf-id" && proxy.client_secret.expose() == "cf-secret"
            })
        })
        .returning(|_, pk, _| Ok(group(pk, "g")));

    service(settings, api).get_group("g").await.expect("group");
}
