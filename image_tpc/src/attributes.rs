use crate::TextureError;

// These attributes continue on the following lines.
const MULTI_LINE_KEYS: [&str; 2] = ["channelscale", "channeltranslate"];
const MULTI_LINE_COUNT: usize = 4;

/// An ordered map of texture attributes from the text block after the pixel data.
///
/// Keys are ASCII case insensitive and stored in ASCII lowercase.
/// Other characters keep their case.
/// Inserting an existing key replaces its value but keeps its original position.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Attributes {
    entries: Vec<(String, String)>,
    lines: Vec<String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the line based `name value` text format.
    ///
    /// Empty lines are skipped. Lines without a space define a key with an empty value.
    pub fn parse(text: &str) -> Result<Self, TextureError> {
        let lines: Vec<String> = text
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect();

        let mut attributes = Self::new();

        let mut remaining = lines.iter();
        while let Some(line) = remaining.next() {
            let (key, mut value) = match line.split_once(' ') {
                Some((key, value)) => (key.trim().to_ascii_lowercase(), value.trim().to_string()),
                None => (line.to_ascii_lowercase(), String::new()),
            };

            if MULTI_LINE_KEYS.contains(&key.as_str()) {
                for _ in 0..MULTI_LINE_COUNT {
                    let next = remaining.next().ok_or_else(|| TextureError::Format {
                        key: key.clone(),
                        value: value.clone(),
                    })?;
                    value.push(' ');
                    value.push_str(next);
                }
            }

            attributes.insert(key, value);
        }

        attributes.lines = lines;
        Ok(attributes)
    }

    /// Insert `value` for `key` and return the previous value if present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into().to_ascii_lowercase();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, previous)) => {
                tracing::debug!("Replacing duplicate attribute {key} {previous:?} with {value:?}");
                Some(std::mem::replace(previous, value))
            }
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Parse the value for `key` as an integer.
    ///
    /// Missing and empty values are treated as `0`.
    pub fn get_u16(&self, key: &str) -> Result<u16, TextureError> {
        match self.get(key) {
            None | Some("") => Ok(0),
            Some(value) => value.parse().map_err(|_| TextureError::Format {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The non empty lines of the parsed text without any processing.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attributes = Self::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty() {
        let attributes = Attributes::parse("").unwrap();
        assert!(attributes.is_empty());
        assert!(attributes.lines().is_empty());
    }

    #[test]
    fn parse_cycle_procedure() {
        let attributes =
            Attributes::parse("proceduretype cycle\r\nnumx 2\r\nnumy 4\r\nfps 16\r\n").unwrap();
        assert_eq!(
            vec![
                ("proceduretype", "cycle"),
                ("numx", "2"),
                ("numy", "4"),
                ("fps", "16")
            ],
            attributes.iter().collect::<Vec<_>>()
        );
        assert_eq!(2, attributes.get_u16("numx").unwrap());
        assert_eq!(4, attributes.get_u16("numy").unwrap());
    }

    #[test]
    fn parse_keys_case_insensitive() {
        let attributes = Attributes::parse("Cube 1\r\nEnvMapTexture CM_Jedcom").unwrap();
        assert_eq!(Some("1"), attributes.get("cube"));
        assert_eq!(Some("1"), attributes.get("CUBE"));
        // Values keep their case.
        assert_eq!(Some("CM_Jedcom"), attributes.get("envmaptexture"));
    }

    #[test]
    fn parse_key_without_value() {
        let attributes = Attributes::parse("decal\r\nmipmap 0").unwrap();
        assert_eq!(Some(""), attributes.get("decal"));
        assert_eq!(Some("0"), attributes.get("mipmap"));
    }

    #[test]
    fn parse_trims_values() {
        let attributes = Attributes::parse("wateralpha   0.40  \n").unwrap();
        assert_eq!(Some("0.40"), attributes.get("wateralpha"));
    }

    #[test]
    fn parse_multi_line_values() {
        let text = "proceduretype arturo\r\nchannelscale 4\r\n0.2\r\n0.2\r\n0.2\r\n0.2\r\nchanneltranslate 4\r\n0.5\r\n0.7\r\n0.6\r\n0.5\r\nspeed 60\r\n";
        let attributes = Attributes::parse(text).unwrap();
        assert_eq!(Some("4 0.2 0.2 0.2 0.2"), attributes.get("channelscale"));
        assert_eq!(
            Some("4 0.5 0.7 0.6 0.5"),
            attributes.get("channeltranslate")
        );
        assert_eq!(Some("60"), attributes.get("speed"));
        assert_eq!(4, attributes.len());
        assert_eq!(12, attributes.lines().len());
    }

    #[test]
    fn parse_multi_line_missing_lines() {
        let result = Attributes::parse("channelscale 4\r\n0.2\r\n0.2");
        assert!(matches!(
            result,
            Err(TextureError::Format { key, .. }) if key == "channelscale"
        ));
    }

    #[test]
    fn parse_duplicate_keys_last_write_wins() {
        let attributes = Attributes::parse("numx 2\r\nnumy 3\r\nNUMX 5").unwrap();
        assert_eq!(
            vec![("numx", "5"), ("numy", "3")],
            attributes.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn insert_returns_previous() {
        let mut attributes = Attributes::new();
        assert_eq!(None, attributes.insert("cube", "0"));
        assert_eq!(Some("0".to_string()), attributes.insert("CUBE", "1"));
        assert_eq!(Some("1"), attributes.get("cube"));
    }

    #[test]
    fn non_ascii_keys_keep_case() {
        let mut attributes = Attributes::parse("ÜBERBLEND 1").unwrap();
        attributes.insert("FARBTÖNE", "2");

        assert_eq!(Some("1"), attributes.get("ÜBERBLEND"));
        assert_eq!(Some("1"), attributes.get("Überblend"));
        assert_eq!(Some("2"), attributes.get("FARBTÖNE"));
        assert_eq!(Some("2"), attributes.get("farbtÖne"));
        assert_eq!(None, attributes.get("farbtöne"));
        assert_eq!(
            vec![("Überblend", "1"), ("farbtÖne", "2")],
            attributes.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn get_u16_missing_or_empty() {
        let attributes: Attributes = [("numy", "")].into_iter().collect();
        assert_eq!(0, attributes.get_u16("numx").unwrap());
        assert_eq!(0, attributes.get_u16("numy").unwrap());
    }

    #[test]
    fn get_u16_invalid() {
        let attributes: Attributes = [("numx", "two")].into_iter().collect();
        let result = attributes.get_u16("numx");
        assert!(matches!(
            result,
            Err(TextureError::Format { key, value }) if key == "numx" && value == "two"
        ));
    }
}
