// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Development-time layout advisories.
//!
//! A surface draws its ripple and highlight in a content layer that fills the container.
//! Child alignment set on the outer container does not reach that layer, so it must go on
//! the content style instead. [`check_container_style`] reports the misplaced properties and,
//! in debug builds, logs a warning.

use core::fmt;

/// Cross-axis or main-axis placement of children.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Alignment {
    /// Pack at the start.
    Start,
    /// Center.
    Center,
    /// Pack at the end.
    End,
    /// Fill the axis.
    Stretch,
}

/// Layout properties that belong on the content style rather than the container.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChildLayoutProperty {
    /// Cross-axis alignment.
    AlignItems,
    /// Main-axis alignment.
    JustifyContent,
}

impl ChildLayoutProperty {
    /// Property name as written in style sheets.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AlignItems => "align_items",
            Self::JustifyContent => "justify_content",
        }
    }
}

/// The subset of a surface's container style this crate inspects.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContainerStyle {
    /// Cross-axis alignment of children.
    pub align_items: Option<Alignment>,
    /// Main-axis alignment of children.
    pub justify_content: Option<Alignment>,
    /// Corner radius. [`InkWell`](crate::surface::InkWell) copies it into every frame's
    /// [`ContentStyle`](crate::style::ContentStyle).
    pub corner_radius: Option<f64>,
}

/// Child layout set on the container instead of the content style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutAdvisory {
    /// The misplaced properties, in declaration order.
    pub properties: Vec<ChildLayoutProperty>,
}

impl fmt::Display for LayoutAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("surface child layout (")?;
        for (i, p) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(p.name())?;
        }
        f.write_str(") must be applied through the content style")
    }
}

/// Inspect `style` for child layout that belongs on the content style.
///
/// Never fails; the surface still renders, children are simply not aligned as intended.
pub fn check_container_style(style: &ContainerStyle) -> Option<LayoutAdvisory> {
    let mut properties = Vec::new();
    if style.align_items.is_some() {
        properties.push(ChildLayoutProperty::AlignItems);
    }
    if style.justify_content.is_some() {
        properties.push(ChildLayoutProperty::JustifyContent);
    }
    if properties.is_empty() {
        return None;
    }
    let advisory = LayoutAdvisory { properties };
    if cfg!(debug_assertions) {
        log::warn!("{advisory}");
    }
    Some(advisory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_style_has_no_advisory() {
        let style = ContainerStyle {
            corner_radius: Some(8.0),
            ..ContainerStyle::default()
        };
        assert_eq!(check_container_style(&style), None);
    }

    #[test]
    fn reports_each_misplaced_property() {
        let style = ContainerStyle {
            align_items: Some(Alignment::Center),
            justify_content: Some(Alignment::End),
            corner_radius: None,
        };
        let advisory = check_container_style(&style).unwrap();
        assert_eq!(
            advisory.properties,
            vec![
                ChildLayoutProperty::AlignItems,
                ChildLayoutProperty::JustifyContent
            ]
        );
        assert_eq!(
            advisory.to_string(),
            "surface child layout (align_items, justify_content) must be applied through the content style"
        );
    }

    #[test]
    fn single_property() {
        let style = ContainerStyle {
            justify_content: Some(Alignment::Stretch),
            ..ContainerStyle::default()
        };
        let advisory = check_container_style(&style).unwrap();
        assert_eq!(advisory.properties, vec![ChildLayoutProperty::JustifyContent]);
    }
}
