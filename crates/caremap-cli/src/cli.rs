use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "caremap")]
#[command(about = "CareMap CLI: browse the care directory and compute routes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server base URL
    #[arg(
        short,
        long,
        global = true,
        env = "CAREMAP_URL",
        default_value = "http://localhost:8080"
    )]
    pub server: String,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check server health and readiness
    Status,
    /// Browse doctors
    Doctors(DoctorsArgs),
    /// Browse facilities
    Facilities(FacilitiesArgs),
    /// Compute a driving route between two points
    Route(RouteArgs),
}

#[derive(clap::Args)]
pub struct DoctorsArgs {
    #[command(subcommand)]
    pub command: DoctorCommands,
}

#[derive(Subcommand)]
pub enum DoctorCommands {
    /// List all doctors with their facility
    List,
    /// Show one doctor
    Get(IdArgs),
}

#[derive(clap::Args)]
pub struct FacilitiesArgs {
    #[command(subcommand)]
    pub command: FacilityCommands,
}

#[derive(Subcommand)]
pub enum FacilityCommands {
    /// List facilities, optionally filtered
    List(FacilityListArgs),
    /// Show one facility
    Get(IdArgs),
}

#[derive(clap::Args)]
pub struct IdArgs {
    pub id: i64,
}

#[derive(clap::Args, Default)]
pub struct FacilityListArgs {
    /// Free text matched against name and type
    #[arg(long)]
    pub q: Option<String>,
    /// Facility type code or English name (e.g. APOTHEKE, pharmacy)
    #[arg(long = "type")]
    pub facility_type: Option<String>,
    /// Only facilities with (true) or without (false) wheelchair access
    #[arg(long)]
    pub wheelchair_accessible: Option<bool>,
}

impl FacilityListArgs {
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(q) = &self.q {
            params.push(("q", q.clone()));
        }
        if let Some(t) = &self.facility_type {
            params.push(("type", t.clone()));
        }
        if let Some(w) = self.wheelchair_accessible {
            params.push(("wheelchairAccessible", w.to_string()));
        }
        params
    }
}

#[derive(clap::Args)]
#[command(allow_negative_numbers = true)]
pub struct RouteArgs {
    #[arg(long)]
    pub from_lat: f64,
    #[arg(long)]
    pub from_lon: f64,
    #[arg(long)]
    pub to_lat: f64,
    #[arg(long)]
    pub to_lon: f64,
}
