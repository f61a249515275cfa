const SEGMENT_SEPARATOR: char = ',';
const ARGUMENTS_SEPARATOR: &str = "::";
const ARGUMENT_SEPARATOR: char = ';';

/// A compound message key such as `ISO_VALIDATOR_003,ISO_VALIDATOR_004::0x46495200`.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageKey<'a> {
    segments: Vec<Segment<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    /// A bundle key or literal text.
    Plain(&'a str),
    /// A bundle key whose `{}` placeholders are filled with the arguments.
    Template { name: &'a str, arguments: Vec<&'a str> },
}

impl<'a> MessageKey<'a> {
    /// Segments are trimmed and empty segments are skipped. Only the text between the first and
    /// a possible second `::` is read as arguments.
    pub fn parse(key: &'a str) -> Self {
        let segments = key
            .split(SEGMENT_SEPARATOR)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once(ARGUMENTS_SEPARATOR) {
                None => Segment::Plain(segment),
                Some((name, rest)) => {
                    let arguments = rest.split(ARGUMENTS_SEPARATOR).next().unwrap_or_default();
                    Segment::Template {
                        name,
                        arguments: arguments.split(ARGUMENT_SEPARATOR).collect(),
                    }
                }
            })
            .collect();

        MessageKey { segments }
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }
}
