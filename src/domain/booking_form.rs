//! Booking form state: the category cascade, field validation and the
//! submit lifecycle.
//!
//! The selected catalog path is a single record. Every upstream change
//! truncates the path below the changed level and recomputes all option
//! lists from the catalog in one step, so no stale downstream list can
//! survive a selection.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use super::catalog::{
    category_options, item_examples, item_type_options, package_type_options, subcategory_options,
    Catalog,
};
use super::entities::{CargoBooking, Dimensions, LengthUnit, SelectOption, WeightUnit};

/// Smallest accepted value for each dimension field.
pub const MIN_DIMENSION: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CascadeLevel {
    Category,
    Subcategory,
    ItemType,
    PackageType,
}

/// The chosen path through the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub item_type: Option<String>,
    pub package_type: Option<String>,
}

impl Selection {
    /// Returns a copy with `level` set to `value` and every level below it cleared.
    pub fn with(&self, level: CascadeLevel, value: Option<String>) -> Selection {
        match level {
            CascadeLevel::Category => Selection {
                category: value,
                ..Selection::default()
            },
            CascadeLevel::Subcategory => Selection {
                category: self.category.clone(),
                subcategory: value,
                ..Selection::default()
            },
            CascadeLevel::ItemType => Selection {
                category: self.category.clone(),
                subcategory: self.subcategory.clone(),
                item_type: value,
                package_type: None,
            },
            CascadeLevel::PackageType => Selection {
                package_type: value,
                ..self.clone()
            },
        }
    }

    fn path(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        (
            self.category.as_deref(),
            self.subcategory.as_deref(),
            self.item_type.as_deref(),
        )
    }
}

/// Option lists derived from a selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CascadeOptions {
    pub categories: Vec<SelectOption>,
    pub subcategories: Vec<SelectOption>,
    pub item_types: Vec<SelectOption>,
    pub package_types: Vec<SelectOption>,
    pub examples: Vec<String>,
}

impl CascadeOptions {
    pub fn show_examples(&self) -> bool {
        !self.examples.is_empty()
    }
}

/// Derives every option list for `selection`; lists below an unselected level stay empty.
pub fn derive_options(catalog: Option<&Catalog>, selection: &Selection) -> CascadeOptions {
    let mut options = CascadeOptions {
        categories: category_options(catalog),
        ..CascadeOptions::default()
    };

    let (category, subcategory, item_type) = selection.path();
    let Some(category) = category else {
        return options;
    };
    options.subcategories = subcategory_options(catalog, category);

    let Some(subcategory) = subcategory else {
        return options;
    };
    options.item_types = item_type_options(catalog, category, subcategory);

    let Some(item_type) = item_type else {
        return options;
    };
    options.package_types = package_type_options(catalog, category, subcategory, item_type);
    options.examples = item_examples(catalog, category, subcategory, item_type);
    options
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Category,
    Subcategory,
    ItemType,
    PackageType,
    Length,
    Width,
    Height,
    Weight,
    DeclaredValue,
    Origin,
    Destination,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Category => "Category",
            FormField::Subcategory => "Subcategory",
            FormField::ItemType => "Item type",
            FormField::PackageType => "Package type",
            FormField::Length => "Length",
            FormField::Width => "Width",
            FormField::Height => "Height",
            FormField::Weight => "Weight",
            FormField::DeclaredValue => "Declared value",
            FormField::Origin => "Origin",
            FormField::Destination => "Destination",
        }
    }
}

impl From<CascadeLevel> for FormField {
    fn from(level: CascadeLevel) -> Self {
        match level {
            CascadeLevel::Category => FormField::Category,
            CascadeLevel::Subcategory => FormField::Subcategory,
            CascadeLevel::ItemType => FormField::ItemType,
            CascadeLevel::PackageType => FormField::PackageType,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DimensionField {
    Length,
    Width,
    Height,
    Weight,
}

impl From<DimensionField> for FormField {
    fn from(field: DimensionField) -> Self {
        match field {
            DimensionField::Length => FormField::Length,
            DimensionField::Width => FormField::Width,
            DimensionField::Height => FormField::Height,
            DimensionField::Weight => FormField::Weight,
        }
    }
}

/// Raw dimension inputs; `None` means empty or unparsable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DimensionsInput {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub unit: Option<LengthUnit>,
    pub weight_unit: Option<WeightUnit>,
}

impl DimensionsInput {
    pub fn get(&self, field: DimensionField) -> Option<f64> {
        match field {
            DimensionField::Length => self.length,
            DimensionField::Width => self.width,
            DimensionField::Height => self.height,
            DimensionField::Weight => self.weight,
        }
    }

    fn slot(&mut self, field: DimensionField) -> &mut Option<f64> {
        match field {
            DimensionField::Length => &mut self.length,
            DimensionField::Width => &mut self.width,
            DimensionField::Height => &mut self.height,
            DimensionField::Weight => &mut self.weight,
        }
    }
}

/// What the declared-value box currently holds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DeclaredValueInput {
    #[default]
    Empty,
    Value(f64),
    /// Text that is not a finite number.
    Invalid,
}

impl DeclaredValueInput {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return DeclaredValueInput::Empty;
        }
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => DeclaredValueInput::Value(value),
            _ => DeclaredValueInput::Invalid,
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            DeclaredValueInput::Empty => true,
            DeclaredValueInput::Value(value) => *value >= 0.0,
            DeclaredValueInput::Invalid => false,
        }
    }

    fn value(&self) -> Option<f64> {
        match self {
            DeclaredValueInput::Value(value) => Some(*value),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Please fill in all required fields correctly.")]
pub struct ValidationErrors {
    pub fields: Vec<FormField>,
}

impl ValidationErrors {
    pub fn contains(&self, field: FormField) -> bool {
        self.fields.contains(&field)
    }

    pub fn summary(&self) -> String {
        let labels = self
            .fields
            .iter()
            .map(FormField::label)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{self} Missing or invalid: {labels}.")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("A booking is already being submitted.")]
    InFlight,
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

#[derive(Clone, Debug, Default, PartialEq)]
enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Empty,
    CategorySelected,
    SubcategorySelected,
    ItemTypeSelected,
    Ready,
    Submitting,
    Submitted,
    SubmitFailed,
}

impl FormPhase {
    pub fn label(&self) -> &'static str {
        match self {
            FormPhase::Empty => "Choose a category",
            FormPhase::CategorySelected => "Choose a subcategory",
            FormPhase::SubcategorySelected => "Choose an item type",
            FormPhase::ItemTypeSelected => "Complete the shipment details",
            FormPhase::Ready => "Ready to book",
            FormPhase::Submitting => "Submitting…",
            FormPhase::Submitted => "Booked",
            FormPhase::SubmitFailed => "Booking failed",
        }
    }
}

/// Handed out by [`BookingForm::begin_submit`]; carries the copy of the booking to send.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmitTicket {
    generation: u64,
    pub booking: CargoBooking,
}

impl SubmitTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The server accepted the booking; it may echo the stored record.
    Created(Option<CargoBooking>),
    Failed(String),
}

#[derive(Clone, Debug, Default)]
pub struct BookingForm {
    catalog: Option<Arc<Catalog>>,
    selection: Selection,
    options: CascadeOptions,
    description: String,
    dimensions: DimensionsInput,
    declared_value: DeclaredValueInput,
    insurance: bool,
    origin: Option<String>,
    destination: Option<String>,
    origins: Vec<SelectOption>,
    destinations: Vec<SelectOption>,
    touched: HashSet<FormField>,
    submitted: bool,
    state: SubmitState,
    generation: u64,
}

impl BookingForm {
    pub fn new(catalog: Option<Arc<Catalog>>) -> Self {
        let mut form = Self {
            catalog,
            ..Self::default()
        };
        form.refresh_options();
        form
    }

    /// Installs a (re)loaded catalog, dropping selections it no longer contains.
    pub fn set_catalog(&mut self, catalog: Option<Arc<Catalog>>) {
        self.catalog = catalog;
        self.refresh_options();
        let sel = self.selection.clone();
        if !contains(&self.options.categories, sel.category.as_deref()) {
            self.select(CascadeLevel::Category, None);
        } else if !contains(&self.options.subcategories, sel.subcategory.as_deref()) {
            self.select(CascadeLevel::Subcategory, None);
        } else if !contains(&self.options.item_types, sel.item_type.as_deref()) {
            self.select(CascadeLevel::ItemType, None);
        } else if !contains(&self.options.package_types, sel.package_type.as_deref()) {
            self.select(CascadeLevel::PackageType, None);
        }
    }

    pub fn has_catalog(&self) -> bool {
        self.catalog.is_some()
    }

    /// Sets one cascade level; always clears and re-derives every level below it,
    /// even when `value` equals the current selection.
    pub fn select(&mut self, level: CascadeLevel, value: Option<String>) {
        let value = value.filter(|v| !v.trim().is_empty());
        self.selection = self.selection.with(level, value);
        self.touched.insert(level.into());
        self.refresh_options();
        self.edited();
    }

    /// Any edit after a failed submission returns the form to editing.
    fn edited(&mut self) {
        if matches!(self.state, SubmitState::Failed(_)) {
            self.state = SubmitState::Idle;
        }
    }

    pub fn select_category(&mut self, value: Option<String>) {
        self.select(CascadeLevel::Category, value);
    }

    pub fn select_subcategory(&mut self, value: Option<String>) {
        self.select(CascadeLevel::Subcategory, value);
    }

    pub fn select_item_type(&mut self, value: Option<String>) {
        self.select(CascadeLevel::ItemType, value);
    }

    pub fn select_package_type(&mut self, value: Option<String>) {
        self.select(CascadeLevel::PackageType, value);
    }

    fn refresh_options(&mut self) {
        self.options = derive_options(self.catalog.as_deref(), &self.selection);
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn options(&self) -> &CascadeOptions {
        &self.options
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
        self.edited();
    }

    pub fn dimensions(&self) -> &DimensionsInput {
        &self.dimensions
    }

    pub fn set_dimension(&mut self, field: DimensionField, value: Option<f64>) {
        *self.dimensions.slot(field) = value;
        self.touched.insert(field.into());
        self.edited();
    }

    pub fn set_length_unit(&mut self, unit: Option<LengthUnit>) {
        self.dimensions.unit = unit;
        self.edited();
    }

    pub fn set_weight_unit(&mut self, unit: Option<WeightUnit>) {
        self.dimensions.weight_unit = unit;
        self.edited();
    }

    pub fn set_declared_value(&mut self, value: DeclaredValueInput) {
        self.declared_value = value;
        self.touched.insert(FormField::DeclaredValue);
        self.edited();
    }

    pub fn insurance(&self) -> bool {
        self.insurance
    }

    pub fn set_insurance(&mut self, insured: bool) {
        self.insurance = insured;
        self.edited();
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn set_origin(&mut self, value: Option<String>) {
        self.origin = value.filter(|v| !v.trim().is_empty());
        self.touched.insert(FormField::Origin);
        self.edited();
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    pub fn set_destination(&mut self, value: Option<String>) {
        self.destination = value.filter(|v| !v.trim().is_empty());
        self.touched.insert(FormField::Destination);
        self.edited();
    }

    pub fn origin_options(&self) -> &[SelectOption] {
        &self.origins
    }

    pub fn destination_options(&self) -> &[SelectOption] {
        &self.destinations
    }

    pub fn set_origin_options(&mut self, options: Vec<SelectOption>) {
        self.origins = options;
    }

    pub fn set_destination_options(&mut self, options: Vec<SelectOption>) {
        self.destinations = options;
    }

    /// True while a submission is in flight; the submit button is disabled.
    pub fn is_loading(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    pub fn failure_message(&self) -> Option<&str> {
        match &self.state {
            SubmitState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether `field` should be rendered as invalid right now.
    pub fn shows_error(&self, field: FormField) -> bool {
        (self.submitted || self.touched.contains(&field))
            && self
                .validate()
                .err()
                .is_some_and(|errors| errors.contains(field))
    }

    pub fn phase(&self) -> FormPhase {
        match self.state {
            SubmitState::Submitting => return FormPhase::Submitting,
            SubmitState::Submitted => return FormPhase::Submitted,
            SubmitState::Failed(_) => return FormPhase::SubmitFailed,
            SubmitState::Idle => {}
        }
        if self.validate().is_ok() {
            return FormPhase::Ready;
        }
        match self.selection.path() {
            (Some(_), Some(_), Some(_)) => FormPhase::ItemTypeSelected,
            (Some(_), Some(_), None) => FormPhase::SubcategorySelected,
            (Some(_), None, _) => FormPhase::CategorySelected,
            (None, _, _) => FormPhase::Empty,
        }
    }

    /// Checks every rule and builds the booking the form currently describes.
    pub fn validate(&self) -> Result<CargoBooking, ValidationErrors> {
        let mut fields = Vec::new();

        let category = required(&self.selection.category, FormField::Category, &mut fields);
        let subcategory =
            required(&self.selection.subcategory, FormField::Subcategory, &mut fields);
        let item_type = required(&self.selection.item_type, FormField::ItemType, &mut fields);
        let package_type =
            required(&self.selection.package_type, FormField::PackageType, &mut fields);

        let mut dimension = |field: DimensionField| match self.dimensions.get(field) {
            Some(value) if value >= MIN_DIMENSION => value,
            _ => {
                fields.push(field.into());
                0.0
            }
        };
        let length = dimension(DimensionField::Length);
        let width = dimension(DimensionField::Width);
        let height = dimension(DimensionField::Height);
        let weight = dimension(DimensionField::Weight);

        if !self.declared_value.is_valid() {
            fields.push(FormField::DeclaredValue);
        }

        let origin = required(&self.origin, FormField::Origin, &mut fields);
        let destination = required(&self.destination, FormField::Destination, &mut fields);

        if !fields.is_empty() {
            return Err(ValidationErrors { fields });
        }

        let description = self.description.trim();
        Ok(CargoBooking {
            category,
            subcategory,
            item_type,
            package_type,
            description: (!description.is_empty()).then(|| description.to_string()),
            dimensions: Dimensions {
                length,
                width,
                height,
                weight,
                unit: self.dimensions.unit,
                weight_unit: self.dimensions.weight_unit,
            },
            declared_value: self.declared_value.value(),
            insurance: Some(self.insurance),
            origin,
            destination,
            ..CargoBooking::default()
        })
    }

    /// Booking to price, or `None` while the form is invalid.
    pub fn cost_request(&self) -> Option<CargoBooking> {
        self.validate().ok()
    }

    /// Marks the attempt as submitted and, if the form is valid and idle,
    /// moves to `Submitting` and returns the booking to send.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitBlocked> {
        self.submitted = true;
        if self.is_loading() {
            return Err(SubmitBlocked::InFlight);
        }
        let booking = self.validate()?;
        self.generation += 1;
        self.state = SubmitState::Submitting;
        Ok(SubmitTicket {
            generation: self.generation,
            booking,
        })
    }

    /// Applies the result of a submission. Returns `None` when the ticket is
    /// stale (the form was reset or resubmitted in the meantime).
    pub fn complete_submit(
        &mut self,
        ticket: &SubmitTicket,
        result: Result<Option<CargoBooking>, String>,
    ) -> Option<SubmitOutcome> {
        if ticket.generation != self.generation || !self.is_loading() {
            return None;
        }
        match result {
            Ok(created) => {
                self.state = SubmitState::Submitted;
                Some(SubmitOutcome::Created(created))
            }
            Err(message) => {
                self.state = SubmitState::Failed(message.clone());
                Some(SubmitOutcome::Failed(message))
            }
        }
    }

    /// Delayed post-success reset; skipped if anything happened since `generation`.
    pub fn reset_after_success(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.state != SubmitState::Submitted {
            return false;
        }
        self.reset();
        true
    }

    /// Clears every input. Catalog, category options and location options survive.
    pub fn reset(&mut self) {
        let catalog = self.catalog.take();
        let origins = std::mem::take(&mut self.origins);
        let destinations = std::mem::take(&mut self.destinations);
        let generation = self.generation + 1;
        *self = Self::new(catalog);
        self.origins = origins;
        self.destinations = destinations;
        self.generation = generation;
    }
}

fn required(value: &Option<String>, field: FormField, missing: &mut Vec<FormField>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            missing.push(field);
            String::new()
        }
    }
}

fn contains(options: &[SelectOption], value: Option<&str>) -> bool {
    match value {
        Some(value) => options.iter().any(|option| option.value == value),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::default_catalog;
    use crate::domain::entities::to_options;

    fn form() -> BookingForm {
        BookingForm::new(Some(Arc::new(default_catalog())))
    }

    fn values(options: &[SelectOption]) -> Vec<&str> {
        options.iter().map(|option| option.value.as_str()).collect()
    }

    fn complete_form() -> BookingForm {
        let mut form = form();
        form.select_category(Some("Dry Foodstuffs".into()));
        form.select_subcategory(Some("Grains & Legumes".into()));
        form.select_item_type(Some("Rice".into()));
        form.select_package_type(Some("Box".into()));
        for field in [
            DimensionField::Length,
            DimensionField::Width,
            DimensionField::Height,
        ] {
            form.set_dimension(field, Some(10.0));
        }
        form.set_dimension(DimensionField::Weight, Some(5.0));
        form.set_origin(Some("Miami Warehouse".into()));
        form.set_destination(Some("Haiti Port".into()));
        form
    }

    #[test]
    fn rice_path_offers_its_package_types_and_examples() {
        let mut form = form();
        assert_eq!(form.phase(), FormPhase::Empty);

        form.select_category(Some("Dry Foodstuffs".into()));
        assert_eq!(form.phase(), FormPhase::CategorySelected);
        assert_eq!(values(&form.options().subcategories), vec!["Grains & Legumes"]);

        form.select_subcategory(Some("Grains & Legumes".into()));
        assert_eq!(form.phase(), FormPhase::SubcategorySelected);
        assert_eq!(values(&form.options().item_types), vec!["Rice", "Beans"]);

        form.select_item_type(Some("Rice".into()));
        assert_eq!(form.phase(), FormPhase::ItemTypeSelected);
        assert_eq!(
            values(&form.options().package_types),
            vec!["Sack (25kg/50kg)", "Box", "Other"]
        );
        assert_eq!(form.options().examples, vec!["Jasmine Rice", "Parboiled Rice"]);
        assert!(form.options().show_examples());
    }

    #[test]
    fn switching_category_resets_everything_below() {
        let mut form = complete_form();
        form.select_category(Some("Vehicles & Machinery".into()));

        let selection = form.selection();
        assert_eq!(selection.category.as_deref(), Some("Vehicles & Machinery"));
        assert_eq!(selection.subcategory, None);
        assert_eq!(selection.item_type, None);
        assert_eq!(selection.package_type, None);
        assert_eq!(
            values(&form.options().subcategories),
            vec!["Used Vehicles", "Machinery"]
        );
        assert!(form.options().item_types.is_empty());
        assert!(form.options().package_types.is_empty());
        assert!(!form.options().show_examples());
    }

    #[test]
    fn reselecting_the_same_category_still_cascades() {
        let mut form = complete_form();
        form.select_category(Some("Dry Foodstuffs".into()));
        assert_eq!(form.selection().subcategory, None);
        assert_eq!(form.selection().package_type, None);
        assert!(form.options().item_types.is_empty());
        assert_eq!(values(&form.options().subcategories), vec!["Grains & Legumes"]);
    }

    #[test]
    fn subcategory_change_keeps_category_and_clears_item() {
        let mut form = form();
        form.select_category(Some("Vehicles & Machinery".into()));
        form.select_subcategory(Some("Used Vehicles".into()));
        form.select_item_type(Some("Cars".into()));
        form.select_subcategory(Some("Machinery".into()));

        assert_eq!(form.selection().category.as_deref(), Some("Vehicles & Machinery"));
        assert_eq!(form.selection().item_type, None);
        assert_eq!(values(&form.options().item_types), vec!["Construction"]);
        assert!(form.options().package_types.is_empty());
    }

    #[test]
    fn item_type_change_only_clears_package_type() {
        let mut form = complete_form();
        form.select_item_type(Some("Beans".into()));
        assert_eq!(form.selection().subcategory.as_deref(), Some("Grains & Legumes"));
        assert_eq!(form.selection().package_type, None);
        assert_eq!(values(&form.options().package_types), vec!["Sack", "Bag", "Other"]);
        assert_eq!(form.options().examples, vec!["Kidney Beans", "Black Beans"]);
    }

    #[test]
    fn clearing_a_level_empties_the_levels_below() {
        let mut form = complete_form();
        form.select_subcategory(None);
        assert!(form.options().item_types.is_empty());
        assert_eq!(form.phase(), FormPhase::CategorySelected);
    }

    #[test]
    fn unknown_category_yields_no_options() {
        let mut form = form();
        form.select_category(Some("Livestock".into()));
        assert!(form.options().subcategories.is_empty());
        assert_eq!(form.options().categories.len(), 4);
    }

    #[test]
    fn missing_catalog_gives_empty_lists() {
        let mut form = BookingForm::new(None);
        form.select_category(Some("Dry Foodstuffs".into()));
        assert!(form.options().categories.is_empty());
        assert!(form.options().subcategories.is_empty());
    }

    #[test]
    fn late_catalog_keeps_valid_path() {
        let mut form = BookingForm::new(None);
        form.select_category(Some("Dry Foodstuffs".into()));
        form.set_catalog(Some(Arc::new(default_catalog())));
        assert_eq!(form.selection().category.as_deref(), Some("Dry Foodstuffs"));
        assert_eq!(values(&form.options().subcategories), vec!["Grains & Legumes"]);

        form.select_category(Some("Livestock".into()));
        form.set_catalog(Some(Arc::new(default_catalog())));
        assert_eq!(form.selection().category, None);
    }

    #[test]
    fn complete_form_is_ready_and_builds_booking() {
        let mut form = complete_form();
        form.set_description("  ");
        form.set_insurance(true);
        assert_eq!(form.phase(), FormPhase::Ready);
        let booking = form.validate().unwrap();
        assert_eq!(booking.item_type, "Rice");
        assert_eq!(booking.description, None);
        assert_eq!(booking.insurance, Some(true));
        assert_eq!(booking.dimensions.weight, 5.0);
    }

    #[test]
    fn missing_destination_blocks_submission() {
        let mut form = complete_form();
        form.set_destination(None);
        let blocked = form.begin_submit().unwrap_err();
        match blocked {
            SubmitBlocked::Invalid(errors) => {
                assert_eq!(errors.fields, vec![FormField::Destination]);
            }
            other => panic!("unexpected block: {other:?}"),
        }
        assert!(!form.is_loading());
        assert!(form.shows_error(FormField::Destination));
        assert!(!form.shows_error(FormField::Origin));
    }

    #[test]
    fn dimensions_below_minimum_are_invalid() {
        let mut form = complete_form();
        form.set_dimension(DimensionField::Height, Some(0.05));
        form.set_dimension(DimensionField::Length, None);
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields, vec![FormField::Length, FormField::Height]);

        form.set_dimension(DimensionField::Height, Some(MIN_DIMENSION));
        form.set_dimension(DimensionField::Length, Some(1.0));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn negative_declared_value_is_invalid() {
        let mut form = complete_form();
        form.set_declared_value(DeclaredValueInput::Value(-1.0));
        assert!(form.validate().unwrap_err().contains(FormField::DeclaredValue));
        form.set_declared_value(DeclaredValueInput::Value(0.0));
        assert_eq!(form.validate().unwrap().declared_value, Some(0.0));
    }

    #[test]
    fn declared_value_text_is_classified() {
        assert_eq!(DeclaredValueInput::parse("  "), DeclaredValueInput::Empty);
        assert_eq!(DeclaredValueInput::parse(" 12.5 "), DeclaredValueInput::Value(12.5));
        assert_eq!(DeclaredValueInput::parse("abc"), DeclaredValueInput::Invalid);
        assert_eq!(DeclaredValueInput::parse("1,5"), DeclaredValueInput::Invalid);
        assert_eq!(DeclaredValueInput::parse("-"), DeclaredValueInput::Invalid);
        assert_eq!(DeclaredValueInput::parse("inf"), DeclaredValueInput::Invalid);
    }

    #[test]
    fn unparsable_declared_value_blocks_submission() {
        let mut form = complete_form();
        form.set_declared_value(DeclaredValueInput::parse("abc"));
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields, vec![FormField::DeclaredValue]);
        assert!(form.shows_error(FormField::DeclaredValue));
        assert!(matches!(form.begin_submit(), Err(SubmitBlocked::Invalid(_))));

        form.set_declared_value(DeclaredValueInput::parse(""));
        assert_eq!(form.validate().unwrap().declared_value, None);
    }

    #[test]
    fn errors_stay_hidden_until_touched_or_submitted() {
        let form = form();
        assert!(!form.shows_error(FormField::Category));
        assert!(form.cost_request().is_none());
    }

    #[test]
    fn successful_submit_then_delayed_reset() {
        let mut form = complete_form();
        form.set_origin_options(to_options(["Miami Warehouse"]));
        form.set_insurance(true);

        let ticket = form.begin_submit().unwrap();
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert_eq!(form.begin_submit(), Err(SubmitBlocked::InFlight));

        let created = CargoBooking {
            id: Some("bk-1".into()),
            ..ticket.booking.clone()
        };
        let outcome = form.complete_submit(&ticket, Ok(Some(created.clone())));
        assert_eq!(outcome, Some(SubmitOutcome::Created(Some(created))));
        assert_eq!(form.phase(), FormPhase::Submitted);

        assert!(form.reset_after_success(ticket.generation()));
        assert_eq!(form.phase(), FormPhase::Empty);
        assert!(!form.insurance());
        assert!(!form.shows_error(FormField::Destination));
        assert_eq!(form.options().categories.len(), 4);
        assert_eq!(form.origin_options().len(), 1);
    }

    #[test]
    fn failed_submit_keeps_input() {
        let mut form = complete_form();
        let ticket = form.begin_submit().unwrap();
        let outcome = form.complete_submit(&ticket, Err("Origin closed".into()));
        assert_eq!(outcome, Some(SubmitOutcome::Failed("Origin closed".into())));
        assert_eq!(form.phase(), FormPhase::SubmitFailed);
        assert_eq!(form.failure_message(), Some("Origin closed"));
        assert_eq!(form.selection().item_type.as_deref(), Some("Rice"));
        assert!(!form.reset_after_success(ticket.generation()));

        let retry = form.begin_submit().unwrap();
        assert_ne!(retry.generation(), ticket.generation());
    }

    #[test]
    fn editing_after_a_failure_returns_to_editing() {
        let mut form = complete_form();
        let ticket = form.begin_submit().unwrap();
        form.complete_submit(&ticket, Err("down".into()));
        assert_eq!(form.phase(), FormPhase::SubmitFailed);

        form.set_destination(None);
        assert_eq!(form.failure_message(), None);
        assert_eq!(form.phase(), FormPhase::ItemTypeSelected);

        form.set_destination(Some("Haiti Port".into()));
        assert_eq!(form.phase(), FormPhase::Ready);
    }

    #[test]
    fn edits_while_submitting_keep_the_request_in_flight() {
        let mut form = complete_form();
        let ticket = form.begin_submit().unwrap();
        form.set_description("fragile");
        assert!(form.is_loading());
        assert!(form.complete_submit(&ticket, Ok(None)).is_some());
    }

    #[test]
    fn results_for_a_reset_form_are_ignored() {
        let mut form = complete_form();
        let ticket = form.begin_submit().unwrap();
        form.reset();
        assert_eq!(form.complete_submit(&ticket, Ok(None)), None);
        assert_eq!(form.phase(), FormPhase::Empty);
    }

    #[test]
    fn delayed_reset_skipped_after_new_submission() {
        let mut form = complete_form();
        let first = form.begin_submit().unwrap();
        form.complete_submit(&first, Ok(None));
        let second = form.begin_submit().unwrap();
        assert!(!form.reset_after_success(first.generation()));
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert!(form.complete_submit(&second, Ok(None)).is_some());
    }
}
