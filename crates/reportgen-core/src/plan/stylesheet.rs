//! Style resolution: report-level and column-level metadata merged once per
//! role

use crate::classify::ClassifiedFields;
use crate::metadata::{ColumnSpec, ReportSpec};
use crate::style::{
    Alignment, FontStyle, HorizontalAlignment, ResolvedStyle, VerticalAlignment,
};

/// Resolved styles for every role of a report
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    /// Title banner
    pub title: ResolvedStyle,
    /// Column label cells
    pub header: ResolvedStyle,
    /// Group caption banner
    pub caption: ResolvedStyle,
    /// One entry per data column, in column order
    pub data: Vec<ResolvedStyle>,
    /// One entry per data column for totals rows
    pub totals: Vec<ResolvedStyle>,
}

impl StyleSheet {
    /// Resolve all styles of `spec`
    pub fn resolve(spec: &ReportSpec, fields: &ClassifiedFields<'_>) -> Self {
        let data: Vec<ResolvedStyle> = fields
            .data_columns()
            .iter()
            .map(|c| Self::data_style(spec, c))
            .collect();
        let totals = data.iter().cloned().map(|s| s.bold(true)).collect();

        Self {
            title: Self::title_style(spec),
            header: Self::header_style(spec),
            caption: Self::caption_style(spec, fields.primary_header()),
            data,
            totals,
        }
    }

    fn title_style(spec: &ReportSpec) -> ResolvedStyle {
        ResolvedStyle {
            font: FontStyle {
                name: spec.title_font_name.clone(),
                size: spec.title_font_size,
                bold: spec.title_bold,
                color: spec.title_color,
            },
            alignment: Alignment::new()
                .with_horizontal(HorizontalAlignment::Center)
                .with_vertical(VerticalAlignment::Middle),
            ..Default::default()
        }
    }

    fn header_style(spec: &ReportSpec) -> ResolvedStyle {
        ResolvedStyle {
            font: FontStyle {
                name: spec.header_font_name.clone(),
                size: spec.header_font_size,
                bold: spec.header_font_bold,
                color: spec.header_font_color,
            },
            fill: spec.header_background_color,
            border: spec.border_color,
            alignment: Alignment::new()
                .with_horizontal(HorizontalAlignment::Center)
                .with_vertical(VerticalAlignment::Middle)
                .with_wrap(true),
            number_format: None,
        }
    }

    /// Captions take font, background and alignment from the first header
    /// field and their color from the report's header font color.
    fn caption_style(spec: &ReportSpec, primary: Option<&ColumnSpec>) -> ResolvedStyle {
        let Some(column) = primary else {
            return ResolvedStyle {
                font: FontStyle::new(),
                border: spec.border_color,
                ..Default::default()
            };
        };

        ResolvedStyle {
            font: FontStyle {
                name: column.font_name.clone(),
                size: column.font_size,
                bold: column.font_bold,
                color: spec.header_font_color,
            },
            fill: column.background_color,
            border: spec.border_color,
            alignment: Alignment::new().with_horizontal(column.text_align.unwrap_or_default()),
            number_format: None,
        }
    }

    /// Bold data cells reuse the header font color.
    fn data_style(spec: &ReportSpec, column: &ColumnSpec) -> ResolvedStyle {
        ResolvedStyle {
            font: FontStyle {
                name: column.font_name.clone(),
                size: column.font_size,
                bold: column.font_bold,
                color: if column.font_bold {
                    spec.header_font_color
                } else {
                    None
                },
            },
            fill: column.background_color,
            border: spec.border_color,
            alignment: Alignment::new()
                .with_horizontal(column.text_align.unwrap_or_default())
                .with_wrap(column.wrap_text),
            number_format: column.number_format().map(str::to_string),
        }
    }
}
