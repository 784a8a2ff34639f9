use std::sync::{Arc, Barrier};
use std::thread;

use contractprims_registry::{derive, Contract, ContractRegistry, ContractType, RegistryError};
use serde::{Deserialize, Serialize};

macro_rules! contract {
    ($name:ident, $id:expr) => {
        #[derive(Serialize, Deserialize)]
        struct $name;

        impl Contract for $name {
            const CONTRACT_ID: Option<&'static str> = Some($id);
        }
    };
}

contract!(RacerA, "race");
contract!(RacerB, "race");
contract!(RacerC, "race");
contract!(RacerD, "race");
contract!(Solo0, "solo-0");
contract!(Solo1, "solo-1");
contract!(Solo2, "solo-2");
contract!(Solo3, "solo-3");

const ROUNDS: usize = 32;

#[test]
fn exactly_one_type_wins_a_contested_identifier() {
    let racers = [
        ContractType::of::<RacerA>(),
        ContractType::of::<RacerB>(),
        ContractType::of::<RacerC>(),
        ContractType::of::<RacerD>(),
    ];

    for _ in 0..ROUNDS {
        let registry = ContractRegistry::new(derive::declared_id);
        let barrier = Barrier::new(racers.len());

        let outcomes: Vec<(ContractType, bool)> = thread::scope(|scope| {
            let handles: Vec<_> = racers
                .iter()
                .map(|racer| {
                    let registry = &registry;
                    let barrier = &barrier;
                    scope.spawn(move || {
                        barrier.wait();
                        match registry.register_contract(*racer) {
                            Ok(_) => (*racer, true),
                            Err(RegistryError::ContractConflict { .. }) => (*racer, false),
                            Err(other) => panic!("unexpected error: {other}"),
                        }
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        let winners: Vec<ContractType> = outcomes
            .iter()
            .filter(|(_, won)| *won)
            .map(|(racer, _)| *racer)
            .collect();
        assert_eq!(winners.len(), 1, "exactly one registration must succeed");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get_registered_contract("race").unwrap(), winners[0]);
    }
}

#[test]
fn same_type_from_many_threads_always_succeeds() {
    let registry = Arc::new(ContractRegistry::new(derive::declared_id));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..100 {
                    registry.register::<RacerA>().unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.len(), 1);
    assert!(registry.get_registered_contract("race").unwrap().is::<RacerA>());
}

#[test]
fn distinct_identifiers_register_in_parallel() {
    let registry = ContractRegistry::new(derive::declared_id);
    let solos = [
        ContractType::of::<Solo0>(),
        ContractType::of::<Solo1>(),
        ContractType::of::<Solo2>(),
        ContractType::of::<Solo3>(),
    ];

    thread::scope(|scope| {
        for solo in &solos {
            let registry = &registry;
            scope.spawn(move || {
                registry.register_contract(*solo).unwrap();
                assert!(registry.is_contract_type_registered(solo));
            });
        }
        // Readers run alongside the writers and must never fail.
        scope.spawn(|| {
            for _ in 0..1_000 {
                let _ = registry.try_get_registered_contract("solo-0");
                let _ = registry.is_contract_registered("solo-3");
            }
        });
    });

    assert_eq!(
        registry.identifiers(),
        vec!["solo-0", "solo-1", "solo-2", "solo-3"]
    );
    for (index, solo) in solos.iter().enumerate() {
        let bound = registry
            .get_registered_contract(&format!("solo-{index}"))
            .unwrap();
        assert_eq!(&bound, solo);
    }
}
