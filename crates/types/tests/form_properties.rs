use proptest::prelude::*;
use roster_types::{Draft, FormField, StudentForm, ValidationError, normalize_age, validate};

fn blank() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ \t]{0,4}").unwrap()
}

fn filled() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z ]{0,12}").unwrap()
}

fn positive_age() -> impl Strategy<Value = u32> {
    1u32..200
}

fn form_with(roster: &[(String, u32, String)]) -> StudentForm {
    let mut form = StudentForm::default();
    for (name, age, grade) in roster {
        form.set_field(FormField::Name, name.clone());
        form.set_field(FormField::Age, age.to_string());
        form.set_field(FormField::Grade, grade.clone());
        form.submit().expect("seed records are valid");
    }
    form
}

proptest! {
    #[test]
    fn any_blank_field_is_missing(
        name in prop_oneof![blank(), filled()],
        age in prop_oneof![blank(), positive_age().prop_map(|a| a.to_string())],
        grade in prop_oneof![blank(), filled()],
    ) {
        prop_assume!(name.trim().is_empty() || age.trim().is_empty() || grade.trim().is_empty());
        let mut form = StudentForm::default();
        form.set_field(FormField::Name, name.clone());
        form.set_field(FormField::Age, age.clone());
        form.set_field(FormField::Grade, grade.clone());
        prop_assert_eq!(form.submit().map(|_| ()), Err(ValidationError::MissingField));
        prop_assert!(form.roster().is_empty());
        prop_assert_eq!(form.draft(), &Draft::new(name, age, grade));
    }

    #[test]
    fn non_positive_or_non_numeric_age_is_invalid(
        seed in prop::collection::vec((filled(), positive_age(), filled()), 0..5),
        name in filled(),
        grade in filled(),
        age in prop_oneof![
            (0i64..1000).prop_map(|n| (-n).to_string()),
            prop::string::string_regex("[a-z]{1,6}").unwrap(),
        ],
    ) {
        prop_assume!(normalize_age(&age).is_none());
        prop_assert_eq!(validate(&Draft::new(name.clone(), age.clone(), grade.clone())), Err(ValidationError::InvalidAge));

        let mut form = form_with(&seed);
        let before = form.roster().list().to_vec();
        form.set_field(FormField::Name, name.clone());
        form.set_field(FormField::Age, age.clone());
        form.set_field(FormField::Grade, grade.clone());
        prop_assert_eq!(form.submit().map(|_| ()), Err(ValidationError::InvalidAge));
        prop_assert_eq!(form.roster().list(), before.as_slice());
        prop_assert_eq!(form.draft(), &Draft::new(name, age, grade));
        prop_assert_eq!(form.error(), Some(ValidationError::InvalidAge));
    }

    #[test]
    fn valid_submit_after_rejection_clears_error(
        seed in prop::collection::vec((filled(), positive_age(), filled()), 0..5),
        name in filled(),
        age in positive_age(),
        grade in filled(),
    ) {
        let mut form = form_with(&seed);
        let before = form.roster().len();
        form.set_field(FormField::Name, name);
        form.set_field(FormField::Grade, grade);
        prop_assert_eq!(form.submit().map(|_| ()), Err(ValidationError::MissingField));
        prop_assert_eq!(form.error(), Some(ValidationError::MissingField));

        form.set_field(FormField::Age, age.to_string());
        prop_assert!(form.submit().is_ok());
        prop_assert_eq!(form.error(), None);
        prop_assert_eq!(form.roster().len(), before + 1);
    }

    #[test]
    fn valid_drafts_append_exactly_one(
        seed in prop::collection::vec((filled(), positive_age(), filled()), 0..5),
        name in filled(),
        age in positive_age(),
        grade in filled(),
    ) {
        let mut form = form_with(&seed);
        let before = form.roster().len();
        form.set_field(FormField::Name, name.clone());
        form.set_field(FormField::Age, format!("{age}.0"));
        form.set_field(FormField::Grade, grade.clone());
        let record = form.submit().expect("valid draft").clone();
        prop_assert_eq!(form.roster().len(), before + 1);
        prop_assert_eq!(record.name(), name.as_str());
        prop_assert_eq!(record.grade(), grade.as_str());
        prop_assert_eq!(record.age(), age.to_string());
        prop_assert!(form.draft().is_empty());
        prop_assert_eq!(form.error(), None);
    }

    #[test]
    fn remove_at_drops_exactly_that_position(
        seed in prop::collection::vec((filled(), positive_age(), filled()), 0..8),
        index in 0usize..10,
    ) {
        let mut form = form_with(&seed);
        let before = form.roster().list().to_vec();
        let removed = form.remove_at(index);
        if index < before.len() {
            let mut expected = before.clone();
            let gone = expected.remove(index);
            prop_assert_eq!(removed, Some(gone));
            prop_assert_eq!(form.roster().list(), expected.as_slice());
        } else {
            prop_assert_eq!(removed, None);
            prop_assert_eq!(form.roster().list(), before.as_slice());
        }
    }
}
