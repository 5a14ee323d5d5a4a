use std::fmt;

use iced::{
    Element, Length, Task,
    widget::{column, container, pick_list, scrollable, text},
};

use crate::{
    core::{
        model::{Location, LocationId, ProjectId},
        route::Route,
        simulator::{self, HomeBody, Simulator},
    },
    gui::{
        AppState,
        screens::{RequestId, Screen, ScreenMessage},
        widgets::{Section, field, layout},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct LocationChoice {
    id: LocationId,
    name: String,
}

impl fmt::Display for LocationChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&Location> for LocationChoice {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.clone(),
            name: location.location_name.clone(),
        }
    }
}

pub struct PreviewScreen {
    request: RequestId,
    simulator: Simulator,
}

#[derive(Debug, Clone)]
pub enum PreviewMessage {
    Loaded(RequestId, Simulator),
    Select(LocationChoice),
}

impl PreviewScreen {
    pub fn open(
        state: &AppState,
        scope: Option<ProjectId>,
    ) -> (Self, Task<ScreenMessage<Self>>) {
        let api = state.api();
        let request = RequestId::next();
        (
            Self {
                request,
                simulator: Simulator::new(),
            },
            Task::perform(
                async move { simulator::load_preview(&api, scope.as_ref()).await },
                move |simulator| {
                    ScreenMessage::ScreenMessage(PreviewMessage::Loaded(request, simulator))
                },
            ),
        )
    }

    fn session_view(&self) -> Element<'_, ScreenMessage<Self>> {
        let sim = &self.simulator;
        let mut content = column![].spacing(14);

        if let Some(home) = sim.home() {
            content = content
                .push(text(home.title).size(28))
                .push(text(home.instructions));
            content = match home.body {
                HomeBody::InitialClue(Some(clue)) => content.push(text(format!("Initial clue: {clue}"))),
                HomeBody::InitialClue(None) => content,
                HomeBody::AllLocations(names) => content.push(
                    names
                        .into_iter()
                        .fold(column![text("Locations:")].spacing(4), |col, name| {
                            col.push(text(format!("• {name}")))
                        }),
                ),
            };
        }

        let summary = sim.summary();
        content = content
            .push(text(format!(
                "Points: {} | Locations visited: {} / {}",
                summary.score, summary.visited, summary.total
            )));

        let choices: Vec<LocationChoice> = sim.locations().iter().map(LocationChoice::from).collect();
        let selected = sim.current_location().map(LocationChoice::from);
        content = content.push(field(
            "Change Location",
            pick_list(choices, selected, |choice| {
                ScreenMessage::ScreenMessage(PreviewMessage::Select(choice))
            })
            .placeholder("Select a location"),
        ));

        if let Some(active) = sim.active_location() {
            let mut location = column![
                text(&active.location.location_name).size(22),
                text(format!("Location Trigger: {}", active.location.location_trigger)),
                text(format!("Position: {}", active.location.location_position)),
            ]
            .spacing(8);
            if let Some(clue) = active.clue() {
                location = location.push(text(format!("Clue: {clue}")));
            }
            location = location.push(text(active.content_text()));
            content = content.push(
                container(location)
                    .padding(10)
                    .width(Length::Fill)
                    .style(container::bordered_box),
            );
        }

        scrollable(content).into()
    }
}

impl Screen for PreviewScreen {
    type Message = PreviewMessage;
    type ParentMessage = Route;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content = if self.simulator.is_ready() {
            self.session_view()
        } else {
            text("Loading...").into()
        };
        layout(Section::Preview, content, ScreenMessage::ParentMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            PreviewMessage::Loaded(request, simulator) => {
                if request == self.request {
                    self.simulator = simulator;
                }
            }
            PreviewMessage::Select(choice) => {
                self.simulator.select(&choice.id);
            }
        }
        Task::none()
    }
}
