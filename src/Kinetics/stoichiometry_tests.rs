#[cfg(test)]
mod tests {
    use crate::Kinetics::reaction_scheme::*;
    use crate::Kinetics::species::*;
    use crate::Kinetics::stoichiometry::*;
    use crate::errors::GenexError;
    use crate::settings::GenexConfig;
    use approx::assert_relative_eq;

    fn demo() -> (SpeciesTable, ReactionScheme) {
        let config = GenexConfig::default();
        (config.species_table().unwrap(), config.reaction_scheme())
    }

    #[test]
    fn demo_scheme_factors() {
        let (species, scheme) = demo();
        let table = solve_stoichiometry(&species, &scheme).unwrap();
        assert_eq!(table.n_reactions(), 4);
        assert_eq!(table.n_species(), 9);
        assert_relative_eq!(table.get(0, 1), 0.81525, epsilon = 1e-4);
        assert_relative_eq!(table.get(0, 2), 0.10226, epsilon = 1e-4);
        assert_relative_eq!(table.get(0, 6), 0.06188, epsilon = 1e-4);
        assert_relative_eq!(table.get(0, 7), 0.02061, epsilon = 1e-4);
        assert_relative_eq!(table.get(1, 8), 0.4168, epsilon = 1e-4);
        assert_relative_eq!(table.get(2, 3), 0.28381, epsilon = 1e-4);
        assert_relative_eq!(table.get(3, 5), 0.34644, epsilon = 1e-4);
        // species that are not products stay 0
        assert_eq!(table.get(0, 3), 0.0);
        assert_eq!(table.get(2, 2), 0.0);
    }

    #[test]
    fn mass_factors_of_balanced_reactions_sum_to_one() {
        let (species, scheme) = demo();
        let table = solve_stoichiometry(&species, &scheme).unwrap();
        for r in 0..table.n_reactions() {
            let sum: f64 = (0..table.n_species()).map(|s| table.get(r, s)).sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn atom_balance_closes() {
        let (species, scheme) = demo();
        let table = solve_stoichiometry(&species, &scheme).unwrap();
        for (r, reaction) in scheme.reactions().iter().enumerate() {
            let reactant = &species[reaction.reactant];
            for e in 0..species.n_elements() {
                let produced: f64 = reaction
                    .products
                    .iter()
                    .map(|&p| {
                        let molar =
                            table.get(r, p) * reactant.formula_weight() / species[p].formula_weight();
                        molar * species[p].composition()[e]
                    })
                    .sum();
                assert_relative_eq!(produced, reactant.composition()[e], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn ratio_constraints_hold() {
        let (species, scheme) = demo();
        // kerogen: asphaltene = 8 * C15+ in moles
        let molar = molar_factors(&species, &scheme, 0).unwrap();
        assert_relative_eq!(molar[0], 8.0 * molar[1], epsilon = 1e-12);
        // asphaltene: precoke = aro / (1 - aro) * C15+
        let molar = molar_factors(&species, &scheme, 1).unwrap();
        let aro = species.kerogen().aromaticity();
        assert_relative_eq!(molar[4] / molar[0], aro / (1.0 - aro), epsilon = 1e-10);
        assert_relative_eq!(molar[4] / molar[0], 1.0889681860822862, epsilon = 1e-9);
    }

    #[test]
    fn aromaticity_of_demo_chains() {
        let (species, scheme) = demo();
        let table = solve_stoichiometry(&species, &scheme).unwrap();
        assert_relative_eq!(
            aromaticity_of_chains(&species, &table),
            0.17642753364280675,
            epsilon = 1e-6
        );
    }

    fn small_table(products: &[(&str, Composition)]) -> SpeciesTable {
        let mut data = vec![SpeciesData::new("kerogen", SpeciesRole::Kerogen, [0.0; N_ELEMENTS])
            .reactive(215.0e3, 235.0e3)];
        for (name, composition) in products {
            let role = match *name {
                "H2O" => SpeciesRole::Water,
                "COx" => SpeciesRole::COx,
                _ => SpeciesRole::Generic,
            };
            let d = SpeciesData::new(name, role, *composition);
            let d = if composition[0] > 0.0 && composition[1] > 0.5 {
                d.mobile(50.0e3, 5.0e-10, 700.0)
            } else if role == SpeciesRole::Generic {
                d
            } else {
                d.mobile(45.0e3, 5.0e-10, 1000.0)
            };
            data.push(d);
        }
        SpeciesTable::new(3, &data, &KerogenInput::default()).unwrap()
    }

    #[test]
    fn negative_factor_of_a_generic_product_is_rejected() {
        // kerogen CH1.2O0.08 -> oil CH1.6 + gas CH4 + COx: the C/H balance needs a
        // negative amount of gas, which is not allowed
        let species = small_table(&[
            ("oil", [1.0, 1.6, 0.0, 0.0, 0.0]),
            ("gas", [1.0, 4.0, 0.0, 0.0, 0.0]),
            ("COx", [1.0, 0.0, 2.0, 0.0, 0.0]),
        ]);
        let scheme = ReactionScheme::new(vec![Reaction::new(0, vec![1, 2, 3], vec![])]);
        match solve_stoichiometry(&species, &scheme) {
            Err(GenexError::InvalidReactionScheme { reaction, .. }) => assert_eq!(reaction, 0),
            other => panic!("expected an invalid scheme, got {:?}", other),
        }
    }

    #[test]
    fn negative_water_is_tolerated() {
        // kerogen -> 0.9 CH1.6 + 0.1 CO2 - 0.12 H2O
        let species = small_table(&[
            ("oil", [1.0, 1.6, 0.0, 0.0, 0.0]),
            ("COx", [1.0, 0.0, 2.0, 0.0, 0.0]),
            ("H2O", [0.0, 2.0, 1.0, 0.0, 0.0]),
        ]);
        let scheme = ReactionScheme::new(vec![Reaction::new(0, vec![1, 2, 3], vec![])]);
        let molar = molar_factors(&species, &scheme, 0).unwrap();
        assert_relative_eq!(molar[0], 0.9, epsilon = 1e-12);
        assert_relative_eq!(molar[1], 0.1, epsilon = 1e-12);
        assert_relative_eq!(molar[2], -0.12, epsilon = 1e-12);
        let table = solve_stoichiometry(&species, &scheme).unwrap();
        assert!(table.get(0, 3) < 0.0);
        let sum: f64 = (1..4).map(|s| table.get(0, s)).sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn scheme_must_be_exactly_determined() {
        let species = small_table(&[
            ("oil", [1.0, 1.6, 0.0, 0.0, 0.0]),
            ("COx", [1.0, 0.0, 2.0, 0.0, 0.0]),
        ]);
        let scheme = ReactionScheme::new(vec![Reaction::new(0, vec![1, 2], vec![])]);
        assert!(!scheme.is_exactly_determined(&species, 0));
        assert!(matches!(
            solve_stoichiometry(&species, &scheme),
            Err(GenexError::InvalidReactionScheme { .. })
        ));
    }

    #[test]
    fn mass_factor_conversion() {
        let (species, _) = demo();
        let factor = mass_stoich_factor(&species[0], &species[5], 1.0);
        assert_relative_eq!(
            factor,
            species[5].formula_weight() / species[0].formula_weight(),
            epsilon = 1e-15
        );
        assert!(may_be_consumed(3, &species[7]));
        assert!(may_be_consumed(0, &species[6]));
        assert!(!may_be_consumed(0, &species[5]));
    }
}
