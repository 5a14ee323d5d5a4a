//! Integration tests for the project and location lists.
//!
//! Tests cover:
//! - Loading lists, including partial failures
//! - Removing rows by id only after a confirmed delete, in any row order
//! - The QR code slot alongside deletes

mod common;

use common::*;
use storypath::core::listing::{
    DELETE_LOCATION_FAILED, LOAD_PROJECT_FAILED, LocationList, ProjectList,
};

#[tokio::test]
async fn test_project_list_delete_removes_row_by_id() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    let (first, _) = seed_project(&store, ParticipantScoring::NotScored, &[]).await?;
    let (second, _) = seed_project(&store, ParticipantScoring::NotScored, &[]).await?;
    let (third, _) = seed_project(&store, ParticipantScoring::NotScored, &[]).await?;

    let mut list = ProjectList::load(&store).await;
    assert_eq!(list.projects().len(), 3);

    list.delete(&store, &second.id).await?;

    let ids: Vec<_> = list.projects().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec![first.id.clone(), third.id.clone()]);
    assert_eq!(ProjectList::load(&store).await.projects(), list.projects());

    Ok(())
}

#[tokio::test]
async fn test_project_list_keeps_rows_when_delete_fails() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    seed_project(&store, ParticipantScoring::NotScored, &[]).await?;
    let mut list = ProjectList::load(&store).await;
    let id = list.projects()[0].id.clone();

    store.close().await?;
    assert!(list.delete(&store, &id).await.is_err());
    assert_eq!(list.projects().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_project_list_load_failure_is_empty() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    seed_project(&store, ParticipantScoring::NotScored, &[]).await?;
    store.close().await?;

    assert!(ProjectList::load(&store).await.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_location_list_load() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    let (project, stops) = seed_project(&store, ParticipantScoring::NotScored, &[1, 2]).await?;

    let list = LocationList::load(&store, Some(project.id.clone())).await;
    assert_eq!(list.project_title(), project.title);
    assert_eq!(list.locations(), stops.as_slice());
    assert_eq!(list.error(), None);
    assert_eq!(list.add_location_route(), Route::NewLocation(Some(project.id.clone())));
    assert_eq!(list.preview_route(), Route::Preview(Some(project.id)));

    Ok(())
}

#[tokio::test]
async fn test_location_list_missing_project_sets_banner() {
    let (store, _temp_dir) = create_test_store().await;

    let list = LocationList::load(&store, Some(ProjectId::new("missing"))).await;
    assert!(list.locations().is_empty());
    assert_eq!(list.error(), Some(LOAD_PROJECT_FAILED));
}

#[tokio::test]
async fn test_location_list_delete_closes_qr_code() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    let (project, stops) = seed_project(&store, ParticipantScoring::NotScored, &[1, 2, 3]).await?;
    let mut list = LocationList::load(&store, Some(project.id.clone())).await;

    assert!(list.show_qr(&stops[1].id));
    assert_eq!(
        list.qr().payload(),
        Some(format!("Location ID: {}", stops[1].id))
    );

    list.delete(&store, &stops[1].id).await?;
    assert_eq!(list.locations(), &[stops[0].clone(), stops[2].clone()]);
    assert!(list.qr().location().is_none());
    assert_eq!(store.get_locations_by_project_id(&project.id).await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_location_list_delete_failure_sets_banner() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    let (project, stops) = seed_project(&store, ParticipantScoring::NotScored, &[1]).await?;
    let mut list = LocationList::load(&store, Some(project.id)).await;

    store.close().await?;
    assert!(list.delete(&store, &stops[0].id).await.is_err());
    assert_eq!(list.error(), Some(DELETE_LOCATION_FAILED));
    assert_eq!(list.locations().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_show_qr_for_unknown_location() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    let (project, stops) = seed_project(&store, ParticipantScoring::NotScored, &[1, 2]).await?;
    let mut list = LocationList::load(&store, Some(project.id)).await;

    assert!(list.show_qr(&stops[0].id));
    assert!(!list.show_qr(&LocationId::new("missing")));
    // the code already shown stays up
    assert_eq!(list.qr().location().map(|l| &l.id), Some(&stops[0].id));

    list.close_qr();
    assert!(list.qr().payload().is_none());

    Ok(())
}

#[tokio::test]
async fn test_project_list_delete_in_reversed_order() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    let (first, _) = seed_project(&store, ParticipantScoring::NotScored, &[]).await?;
    let (second, _) = seed_project(&store, ParticipantScoring::NotScored, &[]).await?;
    let (third, _) = seed_project(&store, ParticipantScoring::NotScored, &[]).await?;

    let mut list = ProjectList::new(vec![third.clone(), second.clone(), first.clone()]);
    list.delete(&store, &third.id).await?;
    assert_eq!(list.projects(), &[second.clone(), first.clone()]);

    list.delete(&store, &first.id).await?;
    assert_eq!(list.projects(), &[second.clone()]);
    assert_eq!(store.get_projects().await?, vec![second]);

    Ok(())
}

#[tokio::test]
async fn test_location_list_delete_in_reversed_order() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    let (project, stops) = seed_project(&store, ParticipantScoring::NotScored, &[1, 2, 3, 4]).await?;

    let reversed: Vec<_> = stops.iter().rev().cloned().collect();
    let mut list = LocationList::new(Some(project.id.clone()), project.title.clone(), reversed);

    assert!(list.show_qr(&stops[2].id));
    list.delete(&store, &stops[1].id).await?;
    assert_eq!(
        list.locations(),
        &[stops[3].clone(), stops[2].clone(), stops[0].clone()]
    );
    // deleting another row leaves the shown code alone
    assert_eq!(list.qr().location().map(|l| &l.id), Some(&stops[2].id));

    list.delete(&store, &stops[3].id).await?;
    assert_eq!(list.locations(), &[stops[2].clone(), stops[0].clone()]);
    assert_eq!(list.error(), None);

    let remaining = store.get_locations_by_project_id(&project.id).await?;
    assert_eq!(remaining, vec![stops[0].clone(), stops[2].clone()]);

    Ok(())
}

#[tokio::test]
async fn test_delete_outcome_for_unlisted_row_is_harmless() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    let (project, stops) = seed_project(&store, ParticipantScoring::NotScored, &[1, 2]).await?;
    let mut list = LocationList::new(Some(project.id), project.title, vec![stops[1].clone()]);

    list.finish_delete(&stops[0].id, Ok(()));
    assert_eq!(list.locations(), &[stops[1].clone()]);
    assert_eq!(list.error(), None);

    list.finish_delete(&stops[1].id, Err("connection reset".to_string()));
    assert_eq!(list.locations(), &[stops[1].clone()]);
    assert_eq!(list.error(), Some(DELETE_LOCATION_FAILED));

    Ok(())
}
