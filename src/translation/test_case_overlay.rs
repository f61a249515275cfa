use crate::domain::{TestCase, TranslationBundle};

/// Returns a copy of `test_case` with its name, description and validator descriptions in the
/// bundle's language. Test cases without a translation are returned unchanged.
pub fn translate_test_case(test_case: &TestCase, bundle: &TranslationBundle) -> TestCase {
    let mut translated = test_case.clone();
    let Some(translation) = bundle.test_case(&test_case.test_id) else {
        return translated;
    };

    translated.test_name = translation.test_name.clone();
    translated.test_description = translation.test_description.clone();
    for validator in translated.validator_defs.iter_mut().flatten() {
        if let Some(description) = bundle.validator(&validator.name) {
            validator.description = description.to_owned();
        }
    }
    translated
}
