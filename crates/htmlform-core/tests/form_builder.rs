//! Integration tests for the form builder over hand-written descriptor tables.
//!
//! Covers:
//! 1. Primitive fields and type inference
//! 2. Name tag and options overrides
//! 3. Nested records, namespacing, and lazy allocation
//! 4. Error lookup
//! 5. Helpers and CSRF attachment

use htmlform_core::builder::{create, FormBuilder};
use htmlform_core::helpers::{extend, map};
use htmlform_core::record::{
    FieldDescriptor, FieldKind, FormValue, NestedRecord, Record, Tags,
};
use htmlform_core::settings::TagSettings;
use htmlform_core::{FormEntry, HelperError, Value, ValueMap};

// ============================================================================
// Shared records
// ============================================================================

#[derive(Default)]
struct City {
    name: String,
    population: u64,
}

static CITY_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor::new("Name", FieldKind::Text, Tags::EMPTY),
    FieldDescriptor::new("Population", FieldKind::Integer, Tags::EMPTY),
];

impl Record for City {
    fn record_name(&self) -> &'static str {
        "City"
    }

    fn fields(&self) -> &'static [FieldDescriptor] {
        &CITY_FIELDS
    }

    fn field_value(&self, index: usize) -> String {
        match index {
            0 => self.name.to_form_value(),
            1 => self.population.to_form_value(),
            _ => String::new(),
        }
    }
}

impl NestedRecord for City {
    fn as_record_mut(&mut self) -> &mut dyn Record {
        self
    }
}

#[derive(Default)]
struct Address {
    street: String,
    city: Option<City>,
}

static ADDRESS_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor::new("Street", FieldKind::Text, Tags::new(&[("schema", "street_line")])),
    FieldDescriptor::new("City", FieldKind::Struct, Tags::EMPTY),
];

impl Record for Address {
    fn record_name(&self) -> &'static str {
        "Address"
    }

    fn fields(&self) -> &'static [FieldDescriptor] {
        &ADDRESS_FIELDS
    }

    fn field_value(&self, index: usize) -> String {
        match index {
            0 => self.street.to_form_value(),
            _ => String::new(),
        }
    }

    fn nested_mut(&mut self, index: usize) -> Option<&mut dyn Record> {
        match index {
            1 => Some(self.city.as_record_mut()),
            _ => None,
        }
    }
}

impl NestedRecord for Address {
    fn as_record_mut(&mut self) -> &mut dyn Record {
        self
    }
}

#[derive(Default)]
struct Person {
    name: String,
    age: i32,
    height: f32,
    password: String,
    address: Option<Box<Address>>,
}

static PERSON_FIELDS: [FieldDescriptor; 5] = [
    FieldDescriptor::new("Name", FieldKind::Text, Tags::EMPTY),
    FieldDescriptor::new("Age", FieldKind::Integer, Tags::EMPTY),
    FieldDescriptor::new("Height", FieldKind::Float, Tags::EMPTY),
    FieldDescriptor::new(
        "Password",
        FieldKind::Text,
        Tags::new(&[("schema", "secret"), ("htmlform", "type=password,name=pw")]),
    ),
    FieldDescriptor::new("Address", FieldKind::Struct, Tags::new(&[("schema", "addr")])),
];

impl Record for Person {
    fn record_name(&self) -> &'static str {
        "Person"
    }

    fn fields(&self) -> &'static [FieldDescriptor] {
        &PERSON_FIELDS
    }

    fn field_value(&self, index: usize) -> String {
        match index {
            0 => self.name.to_form_value(),
            1 => self.age.to_form_value(),
            2 => self.height.to_form_value(),
            3 => self.password.to_form_value(),
            _ => String::new(),
        }
    }

    fn nested_mut(&mut self, index: usize) -> Option<&mut dyn Record> {
        match index {
            4 => Some(self.address.as_record_mut()),
            _ => None,
        }
    }
}

fn person() -> Person {
    Person {
        name: "Grace".into(),
        age: 85,
        height: 1.5,
        password: "cobol".into(),
        address: Some(Box::new(Address {
            street: "1 Navy Way".into(),
            city: Some(City {
                name: "Arlington".into(),
                population: 238_643,
            }),
        })),
    }
}

fn builder<'a>() -> FormBuilder<'a> {
    FormBuilder::new().with_settings(TagSettings::default())
}

fn required() -> ValueMap {
    map(["required".into(), true.into()]).unwrap()
}

// ============================================================================
// 1. Primitive fields
// ============================================================================

#[test]
fn test_primitive_fields_one_entry_each() {
    let form = builder().build(&mut person());
    let name = form.field("Name").unwrap();
    let age = form.field("Age").unwrap();
    let height = form.field("Height").unwrap();

    assert_eq!((name.field_type.as_str(), name.value.as_str()), ("text", "Grace"));
    assert_eq!((age.field_type.as_str(), age.value.as_str()), ("number", "85"));
    assert_eq!((height.field_type.as_str(), height.value.as_str()), ("number", "1.5"));
    assert_eq!(form.len(), 5);
}

#[test]
fn test_display_names_are_declared_names_without_tags() {
    let form = builder().build(&mut person());
    assert_eq!(form.field("Name").unwrap().name, "Name");
    assert_eq!(form.field("Age").unwrap().name, "Age");
}

// ============================================================================
// 2. Overrides
// ============================================================================

#[test]
fn test_options_override_type_and_name() {
    let form = builder().build(&mut person());
    let pw = form.field("Password").unwrap();
    assert_eq!(pw.field_type, "password");
    assert!(pw.name.ends_with("pw"));
    assert_eq!(pw.name, "pw");
}

// ============================================================================
// 3. Nested records
// ============================================================================

#[test]
fn test_nested_entries_are_forms() {
    let form = builder().build(&mut person());
    assert!(matches!(form.get("Address"), Some(FormEntry::Form(_))));

    let address = form.nested("Address").unwrap();
    for field in address.leaf_fields() {
        assert!(field.name.starts_with("addr."), "{}", field.name);
    }
    assert_eq!(address.field("Street").unwrap().name, "addr.street_line");

    let city = address.nested("City").unwrap();
    assert_eq!(city.field("Name").unwrap().name, "addr.City.Name");
    assert_eq!(city.field("Name").unwrap().value, "Arlington");
    assert_eq!(city.field("Population").unwrap().value, "238643");
}

#[test]
fn test_deep_unset_nested_records_are_allocated() {
    let mut p = Person::default();
    let form = builder().build(&mut p);

    let address = p.address.as_ref().unwrap();
    assert!(address.city.is_some());
    let city = form.nested("Address").unwrap().nested("City").unwrap();
    assert_eq!(city.field("Population").unwrap().value, "0");
}

#[test]
fn test_independent_records_get_independent_storage() {
    let mut a = Person::default();
    let mut b = Person::default();
    let _ = builder().build(&mut a);
    let _ = builder().build(&mut b);

    a.address.as_mut().unwrap().street = "changed".into();
    assert!(b.address.as_ref().unwrap().street.is_empty());
    assert!(b.address.as_ref().unwrap().city.is_some());
}

// ============================================================================
// 4. Error lookup
// ============================================================================

#[test]
fn test_errors_attached_by_logical_path() {
    let lookup = |path: &str| (path == "Address.City.Name").then(required);
    let form = builder().with_errors(&lookup).build(&mut person());

    let flagged: Vec<&str> = form
        .leaf_fields()
        .into_iter()
        .filter(|f| f.errors.is_some())
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(flagged, vec!["addr.City.Name"]);

    let city_name = form
        .nested("Address")
        .and_then(|a| a.nested("City"))
        .and_then(|c| c.field("Name"))
        .unwrap();
    assert_eq!(city_name.errors, Some(required()));
}

#[test]
fn test_lookup_receives_declared_not_tagged_names() {
    let seen = std::cell::RefCell::new(Vec::new());
    let lookup = |path: &str| {
        seen.borrow_mut().push(path.to_string());
        None
    };
    let _ = builder().with_errors(&lookup).build(&mut person());
    assert_eq!(
        seen.into_inner(),
        vec![
            "Name",
            "Age",
            "Height",
            "Password",
            "Address.Street",
            "Address.City.Name",
            "Address.City.Population",
        ]
    );
}

#[test]
fn test_create_with_namespaces() {
    let lookup = |path: &str| (path == "signup.Age").then(required);
    let form = create(
        &mut person(),
        Some(&lookup),
        &["signup".to_string()],
        &["s".to_string()],
    );
    let age = form.field("Age").unwrap();
    assert_eq!(age.name, "s.Age");
    assert!(age.has_errors());
    assert_eq!(age.namespace(), ["signup".to_string()]);
}

// ============================================================================
// 5. Helpers and CSRF
// ============================================================================

#[test]
fn test_map_helper_contract() {
    let m = map(["a".into(), 1.into(), "b".into(), 2.into()]).unwrap();
    let keys: Vec<&String> = m.keys().collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(m["a"], Value::Int(1));
    assert_eq!(m["b"], Value::Int(2));

    let err = map(["a".into(), 1.into(), "b".into()]).unwrap_err();
    assert!(matches!(err, HelperError::OddArgumentCount { count: 3 }));
    assert!(err.partial().is_none());

    let err = map([1.into(), 1.into()]).unwrap_err();
    assert!(matches!(err, HelperError::NonStringKey { .. }));
    assert_eq!(err.partial().map(ValueMap::len), Some(0));
}

#[test]
fn test_extend_helper_returns_target() {
    let mut target = required();
    let out = extend(&mut target, ["min".into(), 3.into()]).unwrap();
    out.insert("max".into(), 9.into());
    assert_eq!(target.len(), 3);
}

#[test]
fn test_csrf_overwrite_on_built_form() {
    let mut form = builder().build(&mut person());
    form.with_csrf("csrf", "tok123");
    form.with_csrf("csrf", "tok456");

    let csrf_entries = form
        .iter()
        .filter(|(_, e)| matches!(e, FormEntry::Csrf(_)))
        .count();
    assert_eq!(csrf_entries, 1);
    assert_eq!(form.csrf().unwrap().value(), "tok456");
    assert_eq!(form.len(), 6);
}
