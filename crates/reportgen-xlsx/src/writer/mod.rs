//! XLSX report writer

mod sheet;

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use crate::error::XlsxResult;
use crate::styles::XlsxStyleTable;
use reportgen_core::{RenderPlan, ReportSpec};

pub use sheet::sheet_name;

/// XLSX report writer.
///
/// Produces a workbook with a single worksheet named after the report. Title
/// and caption rows are merged across all data columns, page breaks become
/// manual row breaks, and the page setup fits the report to the configured
/// number of pages wide.
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a report to a file path
    pub fn write_file<P: AsRef<Path>>(
        plan: &RenderPlan,
        spec: &ReportSpec,
        path: P,
    ) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(plan, spec, file)
    }

    /// Write a report to a writer
    pub fn write<W: Write + Seek>(plan: &RenderPlan, spec: &ReportSpec, writer: W) -> XlsxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);

        let style_table = XlsxStyleTable::build(plan);
        let name = sheet_name(&spec.name);

        Self::write_content_types(&mut zip)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, &name)?;
        Self::write_workbook_rels(&mut zip)?;
        Self::write_styles_xml(&mut zip, &style_table)?;

        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/worksheets/sheet1.xml", options)?;
        let xml = sheet::worksheet_xml(plan, spec, &style_table);
        zip.write_all(xml.as_bytes())?;

        zip.finish()?;
        log::debug!(
            "Wrote XLSX sheet '{}' with {} plan nodes",
            name,
            plan.nodes().len()
        );
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
    <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet_name: &str,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>
        <sheet name="{}" sheetId="1" r:id="rId1"/>
    </sheets>
</workbook>"#,
            crate::styles::escape_xml(sheet_name)
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        style_table: &XlsxStyleTable,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/styles.xml", options)?;
        let xml = style_table.to_styles_xml();
        zip.write_all(xml.as_bytes())?;
        Ok(())
    }
}
