use super::common::ColorMode;
use clap::Args;
use core::fmt::Write;
use gitstats::Result;
use gitstats::plugin::{ConfigRule, PLUGIN_NAME, PLUGIN_VERSION, config_policy, metric_templates};
use owo_colors::OwoColorize;

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,
}

pub fn show_catalog(args: &CatalogArgs) -> Result<()> {
    let mut output = String::new();
    write_catalog(args.color.use_colors(), &mut output)?;
    print!("{output}");
    Ok(())
}

fn write_catalog<W: Write>(use_colors: bool, writer: &mut W) -> Result<()> {
    let heading = |text: &str| if use_colors { text.bold().to_string() } else { text.to_string() };

    writeln!(writer, "{} v{PLUGIN_VERSION}", heading(PLUGIN_NAME))?;
    writeln!(writer)?;

    writeln!(writer, "{}", heading("Metrics"))?;
    for template in metric_templates() {
        writeln!(writer, "  {template}")?;
    }
    writeln!(writer)?;

    writeln!(writer, "{}", heading("Configuration"))?;
    for rule in config_policy() {
        writeln!(writer, "  {}", describe_rule(rule))?;
    }

    Ok(())
}

fn describe_rule(rule: &ConfigRule) -> String {
    if rule.required {
        format!("{} (string, required)", rule.key)
    } else {
        format!("{} (string, default '{}')", rule.key, rule.default)
    }
}
