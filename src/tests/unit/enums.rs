//! Dictionary Enum Tests

use crate::database::{
    ConfigType, DataCategory, Labeled, ModelType, QuestionLabel, QuestionType, RecordStatus,
};

#[test]
fn test_labels_round_trip() {
    fn check<E: Labeled + PartialEq + std::fmt::Debug + 'static>() {
        for &variant in E::variants() {
            assert_eq!(E::from_label(variant.label()), Some(variant));
        }
        assert_eq!(E::from_label("no such label"), None);
        // The sentinel is not a variant label.
        assert_eq!(E::from_label(E::ALL), None);
    }

    check::<DataCategory>();
    check::<RecordStatus>();
    check::<QuestionType>();
    check::<QuestionLabel>();
    check::<ModelType>();
    check::<ConfigType>();
}

#[test]
fn test_stored_codes_are_stable() {
    assert_eq!(DataCategory::Text.code(), 1);
    assert_eq!(DataCategory::Video.code(), 4);
    assert_eq!(RecordStatus::Disabled.code(), 0);
    assert_eq!(RecordStatus::Enabled.code(), 1);
    assert_eq!(QuestionType::QuestionAnswer.code(), 3);
    assert_eq!(ModelType::Local.code(), 2);
    assert_eq!(ConfigType::RefereeModel.code(), 2);
}
