use anyhow::Result;

use crate::cli::{FacilityListArgs, OutputFormat};
use crate::client::CaremapClient;
use crate::output::{DOCTOR_COLUMNS, FACILITY_COLUMNS, print_value};

pub async fn list_doctors(client: &CaremapClient, format: OutputFormat) -> Result<()> {
    let doctors = client.doctors().await?;
    print_value(&doctors, format, DOCTOR_COLUMNS);
    Ok(())
}

pub async fn get_doctor(client: &CaremapClient, id: i64, format: OutputFormat) -> Result<()> {
    let doctor = client.doctor(id).await?;
    print_value(&doctor, format, DOCTOR_COLUMNS);
    Ok(())
}

pub async fn list_facilities(
    client: &CaremapClient,
    args: &FacilityListArgs,
    format: OutputFormat,
) -> Result<()> {
    let facilities = client.facilities(&args.query_params()).await?;
    print_value(&facilities, format, FACILITY_COLUMNS);
    Ok(())
}

pub async fn get_facility(client: &CaremapClient, id: i64, format: OutputFormat) -> Result<()> {
    let facility = client.facility(id).await?;
    print_value(&facility, format, FACILITY_COLUMNS);
    Ok(())
}
