use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use routemap_core::RouteMapConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Road distances between settlements of a drawn map", long_about = None)]
pub struct Cli {
    /// TOML file with network and georeference settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the road distance between every pair of settlements
    Distances {
        svg: PathBuf,
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
        #[command(flatten)]
        network: NetworkArgs,
    },
    /// List the roads and settlements found in a map
    Inspect {
        svg: PathBuf,
        #[command(flatten)]
        network: NetworkArgs,
    },
    /// Write the road network as GeoJSON
    Export {
        svg: PathBuf,
        /// Output file, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        network: NetworkArgs,
    },
    /// Shortest road path between two settlements
    Route {
        svg: PathBuf,
        from: String,
        to: String,
        /// Also write the path as GeoJSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        network: NetworkArgs,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

/// Command line overrides for the network settings
#[derive(Args, Debug, Clone, Default)]
pub struct NetworkArgs {
    /// Maximum arc length between road samples, in drawing units
    #[arg(long)]
    pub sample_step: Option<f64>,
    /// Largest road gap accepted as a junction
    #[arg(long)]
    pub junction_tolerance: Option<f64>,
    /// Radius inside which points share a graph node
    #[arg(long)]
    pub merge_tolerance: Option<f64>,
    /// Kilometres per drawing unit
    #[arg(long)]
    pub scale: Option<f64>,
    #[arg(long)]
    pub roads_layer: Option<String>,
    #[arg(long)]
    pub settlements_layer: Option<String>,
}

impl NetworkArgs {
    pub fn apply(&self, config: &mut RouteMapConfig) {
        if let Some(step) = self.sample_step {
            config.sample_step = step;
        }
        if let Some(tolerance) = self.junction_tolerance {
            config.junction_tolerance = tolerance;
        }
        if let Some(tolerance) = self.merge_tolerance {
            config.merge_tolerance = tolerance;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(label) = &self.roads_layer {
            config.roads_layer.clone_from(label);
        }
        if let Some(label) = &self.settlements_layer {
            config.settlements_layer.clone_from(label);
        }
    }
}
