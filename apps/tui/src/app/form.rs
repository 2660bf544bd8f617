use sports_mapper::api::models::{LeagueDraft, PlayerDraft, TeamDraft};
use sports_mapper::{Catalog, Tab};

/// Which field of the entity form a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Fullname,
    Abbr,
    Sport,
    MainLeague,
    Active,
    FirstName,
    Nickname,
    FullName,
    LastName,
    DisplayName,
    Position,
    LeftHanded,
}

impl EditField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Fullname => "Full name",
            Self::Abbr => "Abbreviation",
            Self::Sport => "Sport",
            Self::MainLeague => "Main league",
            Self::Active => "Active",
            Self::FirstName => "First name",
            Self::Nickname => "Nickname",
            Self::FullName => "Full name",
            Self::LastName => "Last name",
            Self::DisplayName => "Display name",
            Self::Position => "Position",
            Self::LeftHanded => "Left handed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Options as `(id, label)`; index 0 is always "(none)"
    Choice {
        options: Vec<(Option<i64>, String)>,
        index: usize,
    },
    Flag(bool),
}

impl FieldValue {
    fn choice(options: Vec<(Option<i64>, String)>, current: Option<i64>) -> Self {
        let mut all = vec![(None, "(none)".to_string())];
        all.extend(options);
        let index = all.iter().position(|(id, _)| *id == current).unwrap_or(0);
        Self::Choice {
            options: all,
            index,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Choice { options, index } => options
                .get(*index)
                .map(|(_, label)| label.clone())
                .unwrap_or_default(),
            Self::Flag(true) => "Yes".to_string(),
            Self::Flag(false) => "No".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub field: EditField,
    pub value: FieldValue,
}

impl FormField {
    fn text(field: EditField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: FieldValue::Text(value.into()),
        }
    }
}

/// Holds an entity being added or edited until it is saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEntityState {
    pub tab: Tab,
    /// `None` while adding
    pub id: Option<i64>,
    pub fields: Vec<FormField>,
    pub field_index: usize,
    pub editing: bool,
    location_id: Option<i64>,
}

impl EditEntityState {
    /// Form for the entity `id` of `tab`, or an empty one when `id` is `None`
    pub fn open(catalog: &Catalog, tab: Tab, id: Option<i64>) -> Option<Self> {
        let (fields, location_id) = match tab {
            Tab::Leagues => {
                let draft = match id {
                    Some(id) => LeagueDraft::from_league(catalog.league(id)?),
                    None => LeagueDraft {
                        active: true,
                        ..LeagueDraft::default()
                    },
                };
                (league_fields(catalog, id, &draft), None)
            }
            Tab::Teams => {
                let draft = match id {
                    Some(id) => TeamDraft::from_team(catalog.team(id)?),
                    None => TeamDraft::default(),
                };
                let location_id = draft.location_id;
                (team_fields(&draft), location_id)
            }
            Tab::Players => {
                let draft = match id {
                    Some(id) => PlayerDraft::from_player(catalog.player(id)?),
                    None => PlayerDraft::default(),
                };
                (player_fields(catalog, &draft), None)
            }
        };

        Some(Self {
            tab,
            id,
            fields,
            field_index: 0,
            editing: false,
            location_id,
        })
    }

    pub fn title(&self) -> String {
        let verb = if self.id.is_some() { "Edit" } else { "Add" };
        let noun = match self.tab {
            Tab::Leagues => "League",
            Tab::Teams => "Team",
            Tab::Players => "Player",
        };
        format!("{verb} {noun}")
    }

    pub fn current(&self) -> Option<&FormField> {
        self.fields.get(self.field_index)
    }

    pub fn next_field(&mut self) {
        self.field_index = (self.field_index + 1) % self.fields.len().max(1);
    }

    pub fn prev_field(&mut self) {
        let len = self.fields.len().max(1);
        self.field_index = (self.field_index + len - 1) % len;
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(FieldValue::Text(text)) = self.value_mut() {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(FieldValue::Text(text)) = self.value_mut() {
            text.pop();
        }
    }

    /// Steps a choice or flips a flag; text fields ignore it
    pub fn cycle(&mut self, forward: bool) {
        match self.value_mut() {
            Some(FieldValue::Choice { options, index }) => {
                let len = options.len().max(1);
                *index = if forward {
                    (*index + 1) % len
                } else {
                    (*index + len - 1) % len
                };
            }
            Some(FieldValue::Flag(flag)) => *flag = !*flag,
            Some(FieldValue::Text(_)) | None => {}
        }
    }

    fn value_mut(&mut self) -> Option<&mut FieldValue> {
        self.fields.get_mut(self.field_index).map(|f| &mut f.value)
    }

    fn text(&self, field: EditField) -> String {
        match self.value(field) {
            Some(FieldValue::Text(text)) => text.trim().to_string(),
            _ => String::new(),
        }
    }

    fn choice(&self, field: EditField) -> Option<i64> {
        match self.value(field) {
            Some(FieldValue::Choice { options, index }) => {
                options.get(*index).and_then(|(id, _)| *id)
            }
            _ => None,
        }
    }

    fn flag(&self, field: EditField) -> bool {
        matches!(self.value(field), Some(FieldValue::Flag(true)))
    }

    fn value(&self, field: EditField) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| &f.value)
    }

    pub fn league_draft(&self) -> LeagueDraft {
        LeagueDraft {
            name: self.text(EditField::Name),
            fullname: self.text(EditField::Fullname),
            abbr: self.text(EditField::Abbr),
            sport_id: self.choice(EditField::Sport),
            main_league_id: self.choice(EditField::MainLeague),
            active: self.flag(EditField::Active),
        }
    }

    pub fn team_draft(&self) -> TeamDraft {
        TeamDraft {
            name: self.text(EditField::Name),
            first_name: self.text(EditField::FirstName),
            nickname: self.text(EditField::Nickname),
            abbr: self.text(EditField::Abbr),
            full_name: self.text(EditField::FullName),
            location_id: self.location_id,
        }
    }

    pub fn player_draft(&self) -> PlayerDraft {
        PlayerDraft {
            first_name: self.text(EditField::FirstName),
            last_name: self.text(EditField::LastName),
            display_name: self.text(EditField::DisplayName),
            position_id: self.choice(EditField::Position),
            left_handed: self.flag(EditField::LeftHanded),
        }
    }
}

fn league_fields(catalog: &Catalog, id: Option<i64>, draft: &LeagueDraft) -> Vec<FormField> {
    let sports = catalog
        .sports
        .iter()
        .map(|s| (Some(s.id), s.name.clone()))
        .collect();
    let main_leagues = catalog
        .leagues
        .iter()
        .filter(|l| Some(l.id) != id && l.main_league_id.is_none())
        .map(|l| (Some(l.id), l.fullname.clone()))
        .collect();

    vec![
        FormField::text(EditField::Fullname, draft.fullname.clone()),
        FormField::text(EditField::Name, draft.name.clone()),
        FormField::text(EditField::Abbr, draft.abbr.clone()),
        FormField {
            field: EditField::Sport,
            value: FieldValue::choice(sports, draft.sport_id),
        },
        FormField {
            field: EditField::MainLeague,
            value: FieldValue::choice(main_leagues, draft.main_league_id),
        },
        FormField {
            field: EditField::Active,
            value: FieldValue::Flag(draft.active),
        },
    ]
}

fn team_fields(draft: &TeamDraft) -> Vec<FormField> {
    vec![
        FormField::text(EditField::FullName, draft.full_name.clone()),
        FormField::text(EditField::Name, draft.name.clone()),
        FormField::text(EditField::FirstName, draft.first_name.clone()),
        FormField::text(EditField::Nickname, draft.nickname.clone()),
        FormField::text(EditField::Abbr, draft.abbr.clone()),
    ]
}

fn player_fields(catalog: &Catalog, draft: &PlayerDraft) -> Vec<FormField> {
    let positions = catalog
        .positions
        .iter()
        .map(|p| (Some(p.id), p.name.clone()))
        .collect();

    vec![
        FormField::text(EditField::FirstName, draft.first_name.clone()),
        FormField::text(EditField::LastName, draft.last_name.clone()),
        FormField::text(EditField::DisplayName, draft.display_name.clone()),
        FormField {
            field: EditField::Position,
            value: FieldValue::choice(positions, draft.position_id),
        },
        FormField {
            field: EditField::LeftHanded,
            value: FieldValue::Flag(draft.left_handed),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sports_mapper::api::{ApiClient, MemoryTransport};

    async fn demo_catalog() -> Result<Catalog, Box<dyn std::error::Error>> {
        let client = ApiClient::new(MemoryTransport::demo());
        Ok(Catalog::load(&client).await?)
    }

    #[tokio::test]
    async fn edit_form_round_trips_league() -> Result<(), Box<dyn std::error::Error>> {
        let catalog = demo_catalog().await?;
        let league = catalog.league(2).ok_or("league cached")?;

        let form = EditEntityState::open(&catalog, Tab::Leagues, Some(2)).ok_or("form")?;

        assert_eq!(form.title(), "Edit League");
        assert_eq!(form.league_draft(), LeagueDraft::from_league(league));
        Ok(())
    }

    #[tokio::test]
    async fn typing_and_cycling_update_draft() -> Result<(), Box<dyn std::error::Error>> {
        let catalog = demo_catalog().await?;
        let mut form = EditEntityState::open(&catalog, Tab::Players, None).ok_or("form")?;

        for c in "Sam".chars() {
            form.push_char(c);
        }
        form.next_field();
        for c in "Laporta".chars() {
            form.push_char(c);
        }
        form.pop_char();
        form.field_index = 3;
        form.cycle(true);
        form.next_field();
        form.cycle(true);

        let draft = form.player_draft();
        assert_eq!(draft.first_name, "Sam");
        assert_eq!(draft.last_name, "Laport");
        assert_eq!(draft.position_id, Some(2));
        assert!(draft.left_handed);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_entity_has_no_form() -> Result<(), Box<dyn std::error::Error>> {
        let catalog = demo_catalog().await?;
        assert!(EditEntityState::open(&catalog, Tab::Teams, Some(404)).is_none());
        Ok(())
    }
}
