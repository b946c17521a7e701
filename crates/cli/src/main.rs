use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinic_core::{
    export::patients_to_csv,
    sample_data::seed_sample_data,
    validation::{
        validate_age, validate_appointment_description, validate_date, validate_patient_name,
        validate_phone,
    },
    AppointmentWithPatient, ClinicService, Patient, ValidationError,
};

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic patient and appointment records CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate patient fields without storing anything
    CheckPatient {
        /// Full name
        name: String,
        /// Age in whole years
        age: String,
        /// Phone number; spaces, dashes and brackets are ignored
        phone: String,
    },
    /// Validate appointment fields without storing anything
    CheckAppointment {
        /// Date (YYYY-MM-DD)
        date: String,
        /// What the appointment is for
        description: String,
    },
    /// Print the sample records as JSON
    Demo,
    /// Print the sample patients as CSV
    Export,
}

#[derive(Serialize)]
struct DemoOutput {
    patients: Vec<Patient>,
    appointments: Vec<AppointmentWithPatient>,
}

fn check_patient(name: &str, age: &str, phone: &str) -> Result<(), ValidationError> {
    validate_patient_name(name)?;
    validate_age(age)?;
    validate_phone(phone)
}

fn check_appointment(date: &str, description: &str) -> Result<(), ValidationError> {
    validate_date(date)?;
    validate_appointment_description(description)
}

fn seeded_clinic() -> Result<ClinicService, Box<dyn std::error::Error>> {
    let mut clinic = ClinicService::new();
    seed_sample_data(&mut clinic)?;
    Ok(clinic)
}

fn report(result: Result<(), ValidationError>) -> ExitCode {
    match result {
        Ok(()) => {
            println!("OK");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Logs go to stderr so `demo` and `export` output stays machine-readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::CheckPatient { name, age, phone }) => {
            Ok(report(check_patient(&name, &age, &phone)))
        }
        Some(Commands::CheckAppointment { date, description }) => {
            Ok(report(check_appointment(&date, &description)))
        }
        Some(Commands::Demo) => {
            let clinic = seeded_clinic()?;
            let output = DemoOutput {
                patients: clinic.list_patients(),
                appointments: clinic.get_appointments_with_patients(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Export) => {
            let clinic = seeded_clinic()?;
            print!("{}", patients_to_csv(clinic.patients().iter()));
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("Use 'clinic --help' for commands");
            Ok(ExitCode::SUCCESS)
        }
    }
}
