//! Implementation of the `sprig facets` command.

use sprig_core::{
    application::{CatalogService, FacetInfo},
    error::SprigError,
};

use crate::{
    cli::{FacetsArgs, ListFormat},
    commands::{descriptor_builder, load_catalog},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: FacetsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = load_catalog(&args.catalog, &config)?;

    // Availability is only computed when the caller described a project.
    let descriptor = if args.descriptor.is_empty() && !args.available {
        None
    } else {
        let descriptor = descriptor_builder(&args.descriptor, &config)?
            .build()
            .map_err(|e| CliError::Core(SprigError::from(e)))?;
        Some(descriptor)
    };

    let facets = match (&descriptor, args.available) {
        (Some(d), true) => CatalogService::available(&catalog, d),
        (d, _) => CatalogService::list(&catalog, d.as_ref()),
    };

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Json => output.json(&facets)?,
        ListFormat::Table => {
            output.header("Available Facets:")?;
            for line in table_lines(&facets) {
                output.print(&line)?;
            }
        }
        ListFormat::List => {
            for facet in &facets {
                output.print(&facet.id)?;
            }
        }
        ListFormat::Csv => {
            output.print("id,name,group,available")?;
            for facet in &facets {
                output.print(&csv_row(facet))?;
            }
        }
    }

    Ok(())
}

fn table_lines(facets: &[FacetInfo]) -> Vec<String> {
    let width = facets.iter().map(|f| f.id.len()).max().unwrap_or(0);
    facets
        .iter()
        .map(|facet| {
            let marker = match facet.available {
                Some(true) => "  ",
                Some(false) => "- ",
                None => "",
            };
            let mut line = format!("  {marker}{:<width$}  {}", facet.id, facet.name);
            if let Some(description) = &facet.description {
                line.push_str(&format!(" - {description}"));
            }
            line
        })
        .collect()
}

fn csv_row(facet: &FacetInfo) -> String {
    let available = facet.available.map(|a| a.to_string()).unwrap_or_default();
    format!(
        "{},{},{},{}",
        csv_field(&facet.id),
        csv_field(&facet.name),
        csv_field(facet.group.as_deref().unwrap_or_default()),
        available
    )
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str, available: Option<bool>) -> FacetInfo {
        FacetInfo {
            id: id.into(),
            name: format!("{id} name"),
            description: None,
            group: Some("Web".into()),
            conditions: Vec::new(),
            available,
        }
    }

    #[test]
    fn table_aligns_ids_and_marks_unavailable() {
        let lines = table_lines(&[info("web", Some(true)), info("webflux", Some(false))]);
        assert_eq!(lines[0], "    web      web name");
        assert_eq!(lines[1], "  - webflux  webflux name");
    }

    #[test]
    fn csv_quotes_when_needed() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_row(&info("h2", None)), "h2,h2 name,Web,");
    }
}
