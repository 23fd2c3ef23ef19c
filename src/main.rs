use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use agridesk::api::ApiClient;
use agridesk::cli::{Cli, Commands};
use agridesk::config::Config;
use agridesk::loader::{find_fpo, load_farmer_dossier, FarmerDossier};
use agridesk::models::{display_date, display_or_na, display_yes_no, Application, Fpo};
use agridesk::tui;
use agridesk::tui::ui::truncate_string;

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "agridesk=info");
    }

    // Initialize logging to both console and file
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let file_appender = tracing_appender::rolling::never(".", "agridesk.log");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env()),
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    config.validate()?;
    let api = ApiClient::new(&config)?;

    match &cli.command {
        Commands::Fpos { skip, limit } => {
            info!("Listing FPOs (skip={}, limit={})", skip, limit);

            match api.list_fpos(*skip, *limit).await {
                Ok(fpos) => print_fpo_table(&fpos),
                Err(e) => {
                    error!("FPO listing failed: {}", e);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Fpo { id, limit } => {
            info!("Looking up FPO {}", id);

            match find_fpo(&api, id, *limit).await {
                Ok(fpo) => print_fpo_detail(&fpo),
                Err(e) => {
                    error!("FPO lookup failed: {}", e);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Farmer { id } => {
            info!("Resolving farmer dossier for {}", id);

            match load_farmer_dossier(&api, id).await {
                Ok(dossier) => print_dossier(&dossier),
                Err(e) => {
                    error!("Farmer resolution failed: {}", e);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Applications {
            farmer_id,
            skip,
            limit,
        } => {
            info!("Listing applications for farmer {}", farmer_id);

            match api.list_applications(farmer_id, *skip, *limit).await {
                Ok(applications) => print_application_table(farmer_id, &applications),
                Err(e) => {
                    error!("Application listing failed: {}", e);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Tui => {
            info!("Launching TUI interface");

            match tui::run_tui(config).await {
                Ok(_) => info!("TUI exited successfully"),
                Err(e) => {
                    error!("TUI failed: {}", e);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn print_fpo_table(fpos: &[Fpo]) {
    if fpos.is_empty() {
        println!("No FPOs found.");
        return;
    }

    println!("Found {} FPOs:", fpos.len());
    println!();
    println!(
        "{:<26} {:<12} {:<30} {:<16} {:<8} {:<6}",
        "ID", "FPO ID", "Entity Name", "District", "Farmers", "Active"
    );
    println!("{}", "-".repeat(102));

    for fpo in fpos {
        let farmers = fpo
            .no_of_farmers
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        println!(
            "{:<26} {:<12} {:<30} {:<16} {:<8} {:<6}",
            fpo.id,
            fpo.fpo_id,
            truncate_string(&fpo.entity_name, 28),
            truncate_string(&display_or_na(fpo.district.as_deref()), 14),
            farmers,
            display_yes_no(fpo.active)
        );
    }

    println!();
    println!("Total: {} FPOs", fpos.len());
}

fn print_fpo_detail(fpo: &Fpo) {
    println!("FPO Details");
    println!("{}", "=".repeat(40));
    println!("FPO ID:               {}", fpo.fpo_id);
    println!("Entity Name:          {}", fpo.entity_name);
    println!(
        "Constitution:         {}",
        display_or_na(fpo.constitution.as_deref())
    );
    println!(
        "Number of Farmers:    {}",
        fpo.no_of_farmers
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    );
    println!("Address:              {}", display_or_na(fpo.address.as_deref()));
    println!("State:                {}", display_or_na(fpo.state.as_deref()));
    println!("District:             {}", display_or_na(fpo.district.as_deref()));
    println!(
        "Area of Operation:    {}",
        fpo.area_of_operation
            .map(|a| a.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    );
    println!(
        "Establishment Year:   {}",
        display_or_na(fpo.establishment_year.as_deref())
    );
    println!(
        "Major Crops:          {}",
        if fpo.major_crop_produced.is_empty() {
            "N/A".to_string()
        } else {
            fpo.major_crop_produced.join(", ")
        }
    );
    println!(
        "Prev. Year Turnover:  {}",
        fpo.previous_year_turnover
            .map(|t| t.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    );
    println!(
        "Contact Person:       {} ({})",
        display_or_na(fpo.contact_person_name.as_deref()),
        display_or_na(fpo.contact_person_phone.as_deref())
    );
    println!();
    println!("Compliance Documents");
    println!("{}", "-".repeat(40));
    println!(
        "PAN:                  {} (copy collected: {})",
        display_or_na(fpo.pan_no.as_deref()),
        display_yes_no(fpo.is_pan_copy_collected)
    );
    if let Some(image) = &fpo.pan_image {
        println!("  Image: {}", image);
    }
    println!(
        "Incorporation Doc:    collected: {}",
        display_yes_no(fpo.is_incorporation_doc_collected)
    );
    if let Some(image) = &fpo.incorporation_doc_img {
        println!("  Image: {}", image);
    }
    println!(
        "Registration No:      {} (collected: {})",
        display_or_na(fpo.registration_no.as_deref()),
        display_yes_no(fpo.is_registration_no_collected)
    );
    if let Some(image) = &fpo.registration_no_img {
        println!("  Image: {}", image);
    }
    println!(
        "Director/Shareholder: collected: {}",
        display_yes_no(fpo.is_director_shareholder_list_collected)
    );
    if let Some(image) = &fpo.director_shareholder_list_image {
        println!("  Image: {}", image);
    }
    println!();
    println!("Active:               {}", display_yes_no(fpo.active));
    println!("Created At:           {}", display_date(fpo.created_at.as_deref()));
    println!("Updated At:           {}", display_date(fpo.updated_at.as_deref()));
}

fn print_dossier(dossier: &FarmerDossier) {
    let farmer = &dossier.farmer;

    println!("Farmer Details");
    println!("{}", "=".repeat(40));
    println!("Record ID:   {}", farmer.id);
    println!("Farmer ID:   {}", display_or_na(Some(farmer.farmer_id.as_str())));
    println!("Name:        {}", display_or_na(farmer.name.as_deref()));
    println!("Phone:       {}", display_or_na(farmer.phone_no.as_deref()));
    println!("Village:     {}", display_or_na(farmer.village.as_deref()));
    println!(
        "Status:      {}",
        farmer
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    );
    println!("Created On:  {}", display_date(farmer.created_at.as_deref()));

    match &dossier.kyc {
        Some(kyc) => {
            println!();
            println!("KYC Record");
            println!("{}", "-".repeat(40));
            println!(
                "POI Version: {}",
                display_or_na(kyc.poi_version_id.as_deref())
            );
            println!(
                "POA Version: {}",
                display_or_na(kyc.poa_version_id.as_deref())
            );
            println!("Updated At:  {}", display_date(kyc.updated_at.as_deref()));
        }
        None => {
            println!();
            println!("KYC Record:  not on file");
        }
    }

    match &dossier.poi {
        Some(poi) => {
            println!();
            println!("Proof of Identity");
            println!("{}", "-".repeat(40));
            println!("Name:        {}", display_or_na(poi.name.as_deref()));
            println!(
                "DOB:         {}",
                display_or_na(poi.date_of_birth.as_deref())
            );
            println!("ID Number:   {}", display_or_na(poi.id_number.as_deref()));
            println!("Verified:    {}", display_yes_no(poi.is_verified));
            if let Some(image) = &poi.front_image {
                println!("Front Image: {}", image);
            }
            if let Some(image) = &poi.back_image {
                println!("Back Image:  {}", image);
            }
        }
        None => {
            println!();
            println!("Proof of Identity: not on file");
        }
    }

    match &dossier.poa {
        Some(poa) => {
            println!();
            println!("Proof of Address");
            println!("{}", "-".repeat(40));
            println!("Name:        {}", display_or_na(poa.name.as_deref()));
            println!(
                "Village/Town:{}",
                display_or_na(poa.village_town.as_deref())
            );
            println!("District:    {}", display_or_na(poa.district.as_deref()));
            println!("State:       {}", display_or_na(poa.state.as_deref()));
            println!("Pincode:     {}", display_or_na(poa.pincode.as_deref()));
            println!("Verified:    {}", display_yes_no(poa.is_verified));
            if let Some(image) = &poa.front_image {
                println!("Front Image: {}", image);
            }
            if let Some(image) = &poa.back_image {
                println!("Back Image:  {}", image);
            }
        }
        None => {
            println!();
            println!("Proof of Address: not on file");
        }
    }
}

fn print_application_table(farmer_id: &str, applications: &[Application]) {
    if applications.is_empty() {
        println!("No applications found for farmer {}.", farmer_id);
        return;
    }

    println!(
        "Found {} applications for farmer {}:",
        applications.len(),
        farmer_id
    );
    println!();
    println!("{:<28} {:<12} {:<12}", "Application ID", "Status", "Created");
    println!("{}", "-".repeat(54));

    for app in applications {
        println!(
            "{:<28} {:<12} {:<12}",
            app.id,
            app.status,
            display_date(app.created_at.as_deref())
        );
    }

    println!();
    println!("Total: {} applications", applications.len());
}
