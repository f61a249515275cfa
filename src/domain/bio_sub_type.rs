use tracing::warn;

/// Maps a test case segment name to the bio sub type label devices expect.
pub fn bio_sub_type(segment: &str) -> Option<&'static str> {
    let label = match segment {
        "Left" => "Left",
        "Right" => "Right",
        "RightIndex" => "Right IndexFinger",
        "RightMiddle" => "Right MiddleFinger",
        "RightRing" => "Right RingFinger",
        "RightLittle" => "Right LittleFinger",
        "RightThumb" => "Right Thumb",
        "LeftIndex" => "Left IndexFinger",
        "LeftMiddle" => "Left MiddleFinger",
        "LeftRing" => "Left RingFinger",
        "LeftLittle" => "Left LittleFinger",
        "LeftThumb" => "Left Thumb",
        "Face" => "null",
        "UNKNOWN" => "UNKNOWN",
        _ => return None,
    };
    Some(label)
}

/// Unrecognized segments become an empty label so the request keeps one entry per segment.
pub fn bio_sub_types(segments: &[String]) -> Vec<String> {
    segments
        .iter()
        .map(|segment| match bio_sub_type(segment) {
            Some(label) => label.to_owned(),
            None => {
                warn!(segment = segment.as_str(), "⚠️ Unknown bio segment '{}', sending an empty sub type", segment);
                String::new()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Left", Some("Left"))]
    #[case("RightIndex", Some("Right IndexFinger"))]
    #[case("LeftThumb", Some("Left Thumb"))]
    #[case("Face", Some("null"))]
    #[case("UNKNOWN", Some("UNKNOWN"))]
    #[case("LeftToe", None)]
    fn maps_segments(#[case] segment: &str, #[case] expected: Option<&str>) {
        assert_eq!(bio_sub_type(segment), expected);
    }

    #[test]
    fn bio_sub_types_keeps_a_placeholder_for_unknown_segments() {
        let segments = vec!["RightRing".to_string(), "Elbow".to_string(), "LeftLittle".to_string()];

        assert_eq!(bio_sub_types(&segments), vec!["Right RingFinger", "", "Left LittleFinger"]);
    }
}
