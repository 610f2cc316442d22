use crate::{Error, Result};
use rand::Rng;
use rankscope_types::{EventId, NameTable};
use serde::Serialize;

/// RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::new(rng.random(), rng.random(), rng.random())
    }

    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

/// Visually distinct colors, assigned to ids in order and reused cyclically
const DISTINCT: [(u8, u8, u8); 22] = [
    (230, 25, 75),
    (60, 180, 75),
    (255, 225, 25),
    (0, 130, 200),
    (245, 130, 48),
    (145, 30, 180),
    (70, 240, 240),
    (240, 50, 230),
    (210, 245, 60),
    (250, 190, 190),
    (0, 128, 128),
    (230, 190, 255),
    (170, 110, 40),
    (255, 250, 200),
    (128, 0, 0),
    (170, 255, 195),
    (128, 128, 0),
    (255, 215, 180),
    (0, 0, 128),
    (128, 128, 128),
    (255, 255, 255),
    (0, 0, 0),
];

/// One color per interned name
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    names: NameTable,
    colors: Vec<Color>,
}

impl Palette {
    /// Colors from the distinct table, cycling once every entry is used
    pub fn distinct(names: &NameTable) -> Self {
        let colors = (0..names.len())
            .map(|i| {
                let (r, g, b) = DISTINCT[i % DISTINCT.len()];
                Color::from_rgb8(r, g, b)
            })
            .collect();
        Self {
            names: names.clone(),
            colors,
        }
    }

    /// Uniformly random colors drawn from `rng`
    pub fn random<R: Rng>(names: &NameTable, rng: &mut R) -> Self {
        let mut palette = Self::distinct(names);
        palette.randomize(rng);
        palette
    }

    /// Replace every color with a random one
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for color in &mut self.colors {
            *color = Color::random(rng);
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color(&self, id: EventId) -> Option<Color> {
        self.colors.get(id.index()).copied()
    }

    pub fn set(&mut self, id: EventId, color: Color) {
        if let Some(slot) = self.colors.get_mut(id.index()) {
            *slot = color;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (EventId, &str, Color)> {
        self.names
            .iter()
            .zip(self.colors.iter())
            .map(|((id, name), color)| (id, name, *color))
    }

    /// One `name r g b` line per name, in id order
    pub fn to_text(&self) -> String {
        self.iter()
            .map(|(_, name, c)| format!("{} {:.4} {:.4} {:.4}\n", name, c.r, c.g, c.b))
            .collect()
    }

    /// Apply colors from `name r g b` lines; the components are the last three
    /// fields, so names may contain spaces. Entries for unknown names are
    /// ignored. Returns the number of colors applied.
    pub fn apply_text(&mut self, text: &str) -> Result<usize> {
        let mut applied = 0;
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (name, color) = parse_color_line(line).ok_or_else(|| Error::MalformedColor {
                line: index + 1,
                raw: raw.to_string(),
            })?;

            match self.names.lookup_id(&name) {
                Ok(id) => {
                    self.set(id, color);
                    applied += 1;
                }
                Err(_) => tracing::debug!(%name, "palette entry for unknown name ignored"),
            }
        }
        Ok(applied)
    }
}

fn parse_color_line(line: &str) -> Option<(String, Color)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [name @ .., r, g, b] = tokens.as_slice() else {
        return None;
    };
    if name.is_empty() {
        return None;
    }
    let color = Color::new(
        parse_component(r)?,
        parse_component(g)?,
        parse_component(b)?,
    );
    Some((name.join(" "), color))
}

fn parse_component(token: &str) -> Option<f32> {
    let value = token.parse::<f32>().ok()?;
    (0.0..=1.0).contains(&value).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn names(list: &[&str]) -> NameTable {
        let mut table = NameTable::new();
        for name in list {
            table.intern(name);
        }
        table
    }

    #[test]
    fn test_distinct_cycles_table() {
        let labels: Vec<String> = (0..24).map(|i| format!("n{}", i)).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let palette = Palette::distinct(&names(&refs));

        assert_eq!(palette.len(), 24);
        assert_eq!(
            palette.color(EventId::new(0)).map(Color::to_rgb8),
            Some((230, 25, 75))
        );
        assert_eq!(
            palette.color(EventId::new(21)).map(Color::to_rgb8),
            Some((0, 0, 0))
        );
        assert_eq!(palette.color(EventId::new(22)), palette.color(EventId::new(0)));
        assert_eq!(palette.color(EventId::new(24)), None);
    }

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let table = names(&["a", "b", "c"]);
        let first = Palette::random(&table, &mut StdRng::seed_from_u64(7));
        let second = Palette::random(&table, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);

        for (_, _, color) in first.iter() {
            for c in [color.r, color.g, color.b] {
                assert!((0.0..=1.0).contains(&c));
            }
        }
    }

    #[test]
    fn test_text_format() {
        let palette = Palette::distinct(&names(&["main", "io"]));
        insta::assert_snapshot!(palette.to_text(), @r"
        main 0.9020 0.0980 0.2941
        io 0.2353 0.7059 0.2941
        ");
    }

    #[test]
    fn test_apply_text() {
        let mut palette = Palette::distinct(&names(&["main", "MPI Send"]));
        let applied = palette
            .apply_text("# exported\nmain 0 0.5 1\n\nunknown 1 1 1\nMPI Send 1 0 0\n")
            .unwrap();

        assert_eq!(applied, 2);
        assert_eq!(
            palette.color(EventId::new(0)),
            Some(Color::new(0.0, 0.5, 1.0))
        );
        assert_eq!(
            palette.color(EventId::new(1)),
            Some(Color::new(1.0, 0.0, 0.0))
        );
    }

    #[test]
    fn test_apply_text_rejects_bad_lines() {
        let mut palette = Palette::distinct(&names(&["main"]));
        for text in ["main 0 0.5\n", "main 0 0.5 2\n", "main red green blue\n"] {
            assert!(matches!(
                palette.apply_text(text),
                Err(Error::MalformedColor { line: 1, .. })
            ));
        }
    }

    #[test]
    fn test_round_trip_through_text() {
        let table = names(&["a", "b"]);
        let source = Palette::random(&table, &mut StdRng::seed_from_u64(1));
        let mut target = Palette::distinct(&table);
        target.apply_text(&source.to_text()).unwrap();

        for ((_, _, a), (_, _, b)) in source.iter().zip(target.iter()) {
            assert!((a.r - b.r).abs() < 1e-4);
            assert!((a.g - b.g).abs() < 1e-4);
            assert!((a.b - b.b).abs() < 1e-4);
        }
    }
}
