#[cfg(test)]
mod tests {
    use crate::Genex::burial_history::{HistoryPoint, TemperaturePressureHistory};
    use crate::Genex::column_model::*;
    use crate::Genex::kernel::GenexKernel;
    use crate::errors::GenexError;
    use crate::settings::{GenexConfig, SourceRockSettings};
    use approx::assert_relative_eq;

    fn demo_history(config: &GenexConfig) -> TemperaturePressureHistory {
        TemperaturePressureHistory::from_temperatures(
            &[config.run.start_time, config.run.end_time],
            &[config.run.start_temperature, config.run.end_temperature],
            &config.physics,
        )
        .unwrap()
    }

    fn start(history: &TemperaturePressureHistory) -> HistoryPoint {
        history.points()[0]
    }

    /// Organic mass per unit area; the end slices are half slices.
    fn inventory(column: &SourceRockColumn) -> f64 {
        let field = column.concentrations();
        let n = field.n_slices();
        (0..n)
            .map(|i| {
                let weight = if i == 0 || i == n - 1 { 0.5 } else { 1.0 };
                weight * field.slice(i).iter().sum::<f64>()
            })
            .sum()
    }

    #[test]
    fn initial_kerogen_from_toc() {
        let config = GenexConfig::default();
        let kernel = GenexKernel::new(&config).unwrap();
        let initial =
            initial_concentrations(kernel.species(), 0.05, config.physics.inorganic_density)
                .unwrap();
        assert_relative_eq!(initial[0], 147.16193302644032, max_relative = 1e-6);
        assert!(initial[1..].iter().all(|&c| c == 0.0));
        // richer rock holds more kerogen
        let rich = initial_concentrations(kernel.species(), 0.1, config.physics.inorganic_density)
            .unwrap();
        assert!(rich[0] > initial[0]);
        assert!(matches!(
            initial_concentrations(kernel.species(), 1.5, 2650.0),
            Err(GenexError::Argument(_))
        ));
        assert!(initial_concentrations(kernel.species(), 0.0, 2650.0).is_err());
    }

    #[test]
    fn reference_node_rounds_to_the_nearest_slice() {
        assert_eq!(reference_node(0.5, 10), 5);
        assert_eq!(reference_node(0.0, 10), 0);
        assert_eq!(reference_node(1.0, 10), 9);
        assert_eq!(reference_node(0.3, 5), 1);
        assert_eq!(reference_node(0.5, 2), 1);
    }

    #[test]
    fn demo_run() {
        let config = GenexConfig::default();
        let kernel = GenexKernel::new(&config).unwrap();
        let history = demo_history(&config);
        let n_steps = config.run.n_steps;
        let mut column =
            SourceRockColumn::new(&kernel, &config.source_rock, n_steps, start(&history)).unwrap();
        column.run(&history, n_steps).unwrap();
        assert_eq!(column.current_step(), n_steps);
        assert!(column.concentrations().min_value() >= 0.0);

        let kerogen_tr = column.kerogen_conversion_history();
        let asphaltene_tr = column.asphaltene_conversion_history();
        assert_eq!(kerogen_tr.len(), n_steps + 1);
        for t in 1..=n_steps {
            assert!(kerogen_tr[t] >= kerogen_tr[t - 1] - 1e-12);
            assert!(asphaltene_tr[t] >= asphaltene_tr[t - 1] - 1e-12);
        }
        let last = kerogen_tr[n_steps];
        assert!(last > 0.5 && last < 1.0, "kerogen conversion {}", last);
        assert!(asphaltene_tr[n_steps] > 0.5);

        let vre = column.vre_history();
        assert!(vre.windows(2).all(|w| w[1] > w[0]));
        assert_relative_eq!(column.time_history()[n_steps], config.run.end_time, epsilon = 1e-9);
        assert_relative_eq!(
            column.temperature_history()[n_steps],
            config.run.end_temperature,
            epsilon = 1e-9
        );

        // oil leaves through both surfaces
        let oil: f64 = (0..=n_steps)
            .map(|t| column.expelled_mass_volume(ExpelledFluid::Oil, t, 1.0).unwrap().mass)
            .sum();
        assert!(oil > 0.0);
        let up = column.expulsion_history(2, FluxDirection::Up, true).unwrap();
        assert!(up.windows(2).all(|w| w[1] >= w[0]));
        let api = column.api_history().unwrap();
        assert!(api[n_steps] > 0.0);

        let c1 = kernel.species().index_of("C1").unwrap();
        let isotopes = column.isotope_history(c1).unwrap();
        assert_eq!(isotopes.len(), n_steps + 1);
        assert!(isotopes.iter().all(|d| d.is_finite()));
        let expelled = column
            .expelled_isotope_history(c1, FluxDirection::UpAndDown, 0, n_steps)
            .unwrap();
        assert_eq!(expelled.len(), n_steps + 1);
        assert_eq!(expelled[0], 0.0);
        assert!(expelled.iter().all(|d| d.is_finite()));
        assert!(expelled[n_steps] != 0.0);

        let ratios = column.van_krevelen_history();
        // the solid residue loses hydrogen
        assert!(ratios[n_steps].h_over_c < ratios[0].h_over_c);
    }

    #[test]
    fn closed_column_keeps_its_mass() {
        let mut config = GenexConfig::default();
        config.source_rock = SourceRockSettings {
            upper_biot: 0.0,
            lower_biot: 0.0,
            ..SourceRockSettings::default()
        };
        config.isotopes = None;
        let kernel = GenexKernel::new(&config).unwrap();
        let history = demo_history(&config);
        let mut column =
            SourceRockColumn::new(&kernel, &config.source_rock, 100, start(&history)).unwrap();
        let before = inventory(&column);
        column.run(&history, 100).unwrap();
        assert_relative_eq!(inventory(&column), before, max_relative = 1e-9);
        assert!(column.kerogen_conversion_history()[100] > 0.0);
        let expelled = column.expelled_mass_volume(ExpelledFluid::Oil, 100, 1.0).unwrap();
        assert_eq!(expelled, ExpelledAmount::default());
        assert!(column.isotope_history(0).is_none());
        assert!(column.expelled_isotope_history(2, FluxDirection::Up, 0, 10).is_err());
    }

    #[test]
    fn column_without_thickness_is_not_stepped() {
        let mut config = GenexConfig::default();
        config.source_rock.net_thickness = 0.0;
        let kernel = GenexKernel::new(&config).unwrap();
        let history = demo_history(&config);
        let mut column =
            SourceRockColumn::new(&kernel, &config.source_rock, 10, start(&history)).unwrap();
        let initial = column.concentrations().clone();
        column.run(&history, 10).unwrap();
        assert_eq!(column.concentrations(), &initial);
        assert_eq!(column.kerogen_conversion_history()[10], 0.0);
        assert_eq!(
            column.concentration_history(0)[10],
            column.initial_concentrations()[0]
        );
        assert!(column.flux_history(2, FluxDirection::UpAndDown).iter().all(|&f| f == 0.0));
    }

    #[test]
    fn step_arguments() {
        let config = GenexConfig::default();
        let kernel = GenexKernel::new(&config).unwrap();
        let history = demo_history(&config);
        let mut column =
            SourceRockColumn::new(&kernel, &config.source_rock, 2, start(&history)).unwrap();
        assert!(column.step(400.0, 1.0e7, 0.0).is_err());
        assert!(column.step(-1.0, 1.0e7, 1.0).is_err());
        column.step(400.0, 1.0e7, 1.0).unwrap();
        column.step(410.0, 1.0e7, 1.0).unwrap();
        assert!(matches!(
            column.step(420.0, 1.0e7, 1.0),
            Err(GenexError::Argument(_))
        ));
        assert!(column.expelled_mass_volume(ExpelledFluid::Gas, 3, 1.0).is_err());
        assert!(column.expulsion_history(99, FluxDirection::Down, false).is_err());

        let mut settings = config.source_rock.clone();
        settings.n_slices = 1;
        assert!(SourceRockColumn::new(&kernel, &settings, 2, start(&history)).is_err());
    }
}
