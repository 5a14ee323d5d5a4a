use iced::{
    Element, Length, Task,
    widget::{Column, button, column, container, qr_code, row, scrollable, text},
};
use tracing::error;

use crate::{
    core::{
        api::StoryPathApi,
        listing::LocationList,
        model::{LocationId, ProjectId},
        qr::QR_DISPLAY_SIZE,
        route::Route,
    },
    gui::{
        AppState,
        screens::{RequestId, Screen, ScreenMessage},
        widgets::{Section, banner, layout},
    },
};

pub struct LocationListScreen {
    request: RequestId,
    list: Option<LocationList>,
    qr_code: Option<qr_code::Data>,
}

#[derive(Debug, Clone)]
pub enum LocationListMessage {
    Loaded(RequestId, LocationList),
    Delete(LocationId),
    Deleted(LocationId, Result<(), String>),
    ShowQr(LocationId),
    CloseQr,
}

impl LocationListScreen {
    pub fn open(
        state: &AppState,
        project_id: Option<ProjectId>,
    ) -> (Self, Task<ScreenMessage<Self>>) {
        let api = state.api();
        let request = RequestId::next();
        (
            Self {
                request,
                list: None,
                qr_code: None,
            },
            Task::perform(
                async move { LocationList::load(&api, project_id).await },
                move |list| ScreenMessage::ScreenMessage(LocationListMessage::Loaded(request, list)),
            ),
        )
    }

    fn list_view<'a>(&'a self, list: &'a LocationList) -> Element<'a, ScreenMessage<Self>> {
        let msg = ScreenMessage::ScreenMessage;
        let title = if list.project_title().is_empty() {
            "Locations".to_string()
        } else {
            format!("{} - Locations", list.project_title())
        };

        let mut content = column![
            text(title).size(28),
            row![
                button("Add Location")
                    .on_press(ScreenMessage::ParentMessage(list.add_location_route())),
                button("Preview")
                    .style(button::secondary)
                    .on_press(ScreenMessage::ParentMessage(list.preview_route())),
            ]
            .spacing(10),
        ]
        .spacing(14);

        if let Some(error) = list.error() {
            content = content.push(banner(error));
        }

        if let (Some(location), Some(data)) = (list.qr().location(), &self.qr_code) {
            content = content.push(
                container(
                    column![
                        text(format!("QR code for {}", location.location_name)),
                        qr_code(data).total_size(QR_DISPLAY_SIZE),
                        button("Close").on_press(msg(LocationListMessage::CloseQr)),
                    ]
                    .spacing(8),
                )
                .padding(10)
                .style(container::bordered_box),
            );
        }

        if list.locations().is_empty() {
            return content.push(text("No locations yet.")).into();
        }

        let heading = row![
            text("Name").width(Length::FillPortion(2)),
            text("Trigger").width(Length::FillPortion(2)),
            text("Position").width(Length::FillPortion(2)),
            text("Points").width(Length::FillPortion(1)),
            text("Actions").width(Length::FillPortion(3)),
        ]
        .spacing(10);
        let rows = list.locations().iter().map(|location| {
            row![
                text(&location.location_name).width(Length::FillPortion(2)),
                text(location.location_trigger.as_str()).width(Length::FillPortion(2)),
                text(&location.location_position).width(Length::FillPortion(2)),
                text(location.score_points.to_string()).width(Length::FillPortion(1)),
                row![
                    button("Edit").on_press(ScreenMessage::ParentMessage(Route::EditLocation(
                        location.id.clone()
                    ))),
                    button("QR Code")
                        .style(button::secondary)
                        .on_press(msg(LocationListMessage::ShowQr(location.id.clone()))),
                    button("Delete")
                        .style(button::danger)
                        .on_press(msg(LocationListMessage::Delete(location.id.clone()))),
                ]
                .spacing(6)
                .width(Length::FillPortion(3)),
            ]
            .spacing(10)
            .into()
        });

        content
            .push(scrollable(
                Column::with_children(std::iter::once(heading.into()).chain(rows)).spacing(8),
            ))
            .into()
    }

    fn refresh_qr(&mut self) {
        self.qr_code = self
            .list
            .as_ref()
            .and_then(|list| list.qr().payload())
            .and_then(|payload| {
                qr_code::Data::new(payload)
                    .inspect_err(|e| error!("Failed to encode QR code: {e}"))
                    .ok()
            });
    }
}

impl Screen for LocationListScreen {
    type Message = LocationListMessage;
    type ParentMessage = Route;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content = match &self.list {
            Some(list) => self.list_view(list),
            None => text("Loading...").into(),
        };
        layout(Section::Projects, content, ScreenMessage::ParentMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            LocationListMessage::Loaded(request, list) => {
                if request != self.request {
                    return Task::none();
                }
                self.list = Some(list);
                self.refresh_qr();
            }
            LocationListMessage::Delete(id) => {
                let api = state.api();
                let deleted = id.clone();
                return Task::perform(
                    async move { api.delete_location(&id).await.map_err(|e| format!("{e:#}")) },
                    move |result| {
                        ScreenMessage::ScreenMessage(LocationListMessage::Deleted(
                            deleted.clone(),
                            result,
                        ))
                    },
                );
            }
            LocationListMessage::Deleted(id, result) => {
                if let Some(list) = self.list.as_mut() {
                    list.finish_delete(&id, result);
                }
                self.refresh_qr();
            }
            LocationListMessage::ShowQr(id) => {
                if let Some(list) = self.list.as_mut() {
                    list.show_qr(&id);
                }
                self.refresh_qr();
            }
            LocationListMessage::CloseQr => {
                if let Some(list) = self.list.as_mut() {
                    list.close_qr();
                }
                self.qr_code = None;
            }
        }
        Task::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            listing::DELETE_LOCATION_FAILED,
            model::{Location, LocationTrigger},
        },
        gui::screens::test_state,
    };

    fn stop(id: &str) -> Location {
        Location {
            id: LocationId::new(id),
            project_id: ProjectId::new("p1"),
            location_name: format!("Stop {id}"),
            location_trigger: LocationTrigger::QrCodeScan,
            location_position: String::new(),
            score_points: 1,
            clue: None,
            location_content: String::new(),
        }
    }

    fn listed(ids: &[&str]) -> LocationList {
        LocationList::new(
            Some(ProjectId::new("p1")),
            "Walk".to_string(),
            ids.iter().map(|id| stop(id)).collect(),
        )
    }

    fn screen(list: Option<LocationList>) -> LocationListScreen {
        LocationListScreen {
            request: RequestId::next(),
            list,
            qr_code: None,
        }
    }

    #[test]
    fn load_for_another_project_visit_is_ignored() {
        let mut state = test_state();
        let mut screen = screen(Some(listed(&["a", "b"])));

        let earlier = RequestId::next();
        let _ = screen.update(LocationListMessage::Loaded(earlier, listed(&["x"])), &mut state);
        assert_eq!(screen.list, Some(listed(&["a", "b"])));

        let current = screen.request;
        let _ = screen.update(LocationListMessage::Loaded(current, listed(&["c"])), &mut state);
        assert_eq!(screen.list, Some(listed(&["c"])));
    }

    #[test]
    fn deleting_the_shown_location_closes_its_qr_code() {
        let mut state = test_state();
        let mut screen = screen(Some(listed(&["b", "a"])));

        let _ = screen.update(LocationListMessage::ShowQr(LocationId::new("a")), &mut state);
        assert!(screen.qr_code.is_some());

        let _ = screen.update(LocationListMessage::Deleted(LocationId::new("a"), Ok(())), &mut state);
        let list = screen.list.as_ref().expect("list stays loaded");
        assert_eq!(list.locations(), &[stop("b")]);
        assert!(list.qr().location().is_none());
        assert!(screen.qr_code.is_none());
    }

    #[test]
    fn failed_delete_keeps_row_and_shows_banner() {
        let mut state = test_state();
        let mut screen = screen(Some(listed(&["a"])));

        let _ = screen.update(
            LocationListMessage::Deleted(LocationId::new("a"), Err("offline".into())),
            &mut state,
        );
        let list = screen.list.as_ref().expect("list stays loaded");
        assert_eq!(list.locations(), &[stop("a")]);
        assert_eq!(list.error(), Some(DELETE_LOCATION_FAILED));
    }
}
