use crate::Genex::burial_history::TemperaturePressureHistory;
use crate::Genex::column_model::{ExpelledAmount, ExpelledFluid, SourceRockColumn};
use crate::Genex::kernel::GenexKernel;
use crate::errors::GenexError;
use crate::settings::GenexConfig;
use log::{error, info};

pub fn genex_examples(task: usize) {
    let result = match task {
        0 => kernel_setup(),
        1 => demo_run(),
        2 => trap_charge(),
        3 => configuration_file("genex_config.json"),
        _ => {
            error!("no example with number {}", task);
            return;
        }
    };
    if let Err(e) = result {
        error!("example {} failed: {}", task, e);
    }
}

fn demo_history(config: &GenexConfig) -> Result<TemperaturePressureHistory, GenexError> {
    TemperaturePressureHistory::from_temperatures(
        &[config.run.start_time, config.run.end_time],
        &[config.run.start_temperature, config.run.end_temperature],
        &config.physics,
    )
}

// species table, stoichiometry and reference diffusivities of the default scheme
fn kernel_setup() -> Result<(), GenexError> {
    let kernel = GenexKernel::new(&GenexConfig::default())?;
    kernel.pretty_print();
    Ok(())
}

// linear heating of the default source rock, histories every 40 steps
fn demo_run() -> Result<(), GenexError> {
    use prettytable::{Table, row};

    let config = GenexConfig::default();
    let kernel = GenexKernel::new(&config)?;
    let history = demo_history(&config)?;
    let n_steps = config.run.n_steps;
    let mut column = SourceRockColumn::new(&kernel, &config.source_rock, n_steps, history.points()[0])?;
    column.run(&history, n_steps)?;
    column.pretty_print();

    let api = column.api_history()?;
    let mut table = Table::new();
    table.add_row(row!["Time", "T, K", "Kerogen TR", "Asphaltene TR", "VRE", "API"]);
    for t in (0..=n_steps).step_by(40) {
        table.add_row(row![
            format!("{:.1}", column.time_history()[t]),
            format!("{:.1}", column.temperature_history()[t]),
            format!("{:.4}", column.kerogen_conversion_history()[t]),
            format!("{:.4}", column.asphaltene_conversion_history()[t]),
            format!("{:.3}", column.vre_history()[t]),
            format!("{:.2}", api[t])
        ]);
    }
    table.printstd();
    Ok(())
}

// expelled oil and gas collected in a trap above a 10 km2 drainage area
fn trap_charge() -> Result<(), GenexError> {
    use crate::Thermodynamics::fluid_properties::{
        bubble_point_gor, calc_free_gas, determine_field_type, overpressure, saturation_cgr,
        water_density,
    };

    let config = GenexConfig::default();
    let kernel = GenexKernel::new(&config)?;
    let history = demo_history(&config)?;
    let n_steps = config.run.n_steps;
    let mut column = SourceRockColumn::new(&kernel, &config.source_rock, n_steps, history.points()[0])?;
    column.run(&history, n_steps)?;

    let area = 1.0e7;
    let total = |fluid: ExpelledFluid| -> Result<ExpelledAmount, GenexError> {
        let mut sum = ExpelledAmount::default();
        for t in 0..=n_steps {
            let step = column.expelled_mass_volume(fluid, t, area)?;
            sum.mass += step.mass;
            sum.volume += step.volume;
        }
        Ok(sum)
    };
    let oil = total(ExpelledFluid::Oil)?;
    let gas = total(ExpelledFluid::Gas)?;
    let n2 = total(ExpelledFluid::N2)?;
    info!(
        "expelled oil {:.3e} kg, gas {:.3e} kg, N2 {:.3e} kg",
        oil.mass, gas.mass, n2.mass
    );
    if oil.volume <= 0.0 || gas.volume <= 0.0 {
        info!("not enough oil and gas expelled for a trap charge");
        return Ok(());
    }

    let temperature = 90.0 + crate::Utils::physical_constants::ZERO_CELSIUS;
    let pressure = 25.0e6;
    let salinity = 0.05;
    let water_volume = 1.0e8;
    let oil_density = oil.mass / oil.volume;
    let gas_density = gas.mass / gas.volume;
    let saturation_gor = bubble_point_gor(oil_density, gas_density, temperature, pressure)?;
    let free_gas = calc_free_gas(
        oil.volume,
        oil_density,
        gas.volume,
        gas_density,
        water_volume,
        temperature,
        salinity,
        pressure,
    )?;
    let gor = free_gas / oil.volume;
    let water_mass = water_volume * water_density(temperature, pressure, salinity);
    let field = determine_field_type(
        oil.volume,
        free_gas,
        water_volume,
        gor,
        saturation_gor,
        saturation_cgr(temperature, pressure),
    );
    println!("Saturation GOR: {:.2} m3/m3", saturation_gor);
    println!("GOR: {:.2} m3/m3", gor);
    println!(
        "Overpressure: {:.3e} Pa",
        overpressure(oil.mass, gas.mass, n2.mass, water_mass)
    );
    println!("Field type: {}", field);
    Ok(())
}

// writes the default configuration if the file is missing, then runs what it reads
fn configuration_file(config_file: &str) -> Result<(), GenexError> {
    let config = GenexConfig::load_config(config_file)?;
    if !std::path::Path::new(config_file).exists() {
        config.save_config(config_file)?;
    }
    let kernel = GenexKernel::new(&config)?;
    let history = demo_history(&config)?;
    let mut column =
        SourceRockColumn::new(&kernel, &config.source_rock, config.run.n_steps, history.points()[0])?;
    column.run(&history, config.run.n_steps)?;
    column.pretty_print();
    Ok(())
}
