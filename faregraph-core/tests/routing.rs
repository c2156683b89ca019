//! End-to-end routing behavior over small hand-built networks.

use faregraph_core::loading::{
    FareDirectory, FareTables, LineMatrix, StationEntry, TransferEndpoint, TransferRecord,
    build_fare_network,
};
use faregraph_core::{Error, Fare, FareInfo, FareNetwork, FarePolicy, Journey, Station};

fn station(line: &str, name: &str) -> Station {
    Station::new(line, name, name)
}

fn grid(rows: &[&[i64]]) -> Vec<Vec<Fare>> {
    rows.iter()
        .map(|row| row.iter().copied().map(Fare::from_major).collect())
        .collect()
}

fn line(line: &str, names: &[&str], svc: &[&[i64]], sjt: &[&[i64]]) -> LineMatrix {
    LineMatrix {
        transit_line: line.to_string(),
        stations: names
            .iter()
            .map(|name| StationEntry {
                code: name.to_string(),
                name: name.to_string(),
            })
            .collect(),
        fares: FareTables {
            stored_value_card: grid(svc),
            single_journey_ticket: grid(sjt),
        },
    }
}

fn transfer(from_line: &str, from_code: &str, to_line: &str, to_code: &str) -> TransferRecord {
    TransferRecord {
        from: TransferEndpoint {
            transit_line: from_line.to_string(),
            code: from_code.to_string(),
        },
        to: TransferEndpoint {
            transit_line: to_line.to_string(),
            code: to_code.to_string(),
        },
    }
}

/// Two lines of three stations each, joined by one zero-fare transfer
/// between B2 and C1.
fn two_line_directory(with_transfer: bool) -> FareDirectory {
    FareDirectory {
        matrices: vec![
            line(
                "GL",
                &["A1", "B1", "B2"],
                &[&[0, 15, 18], &[15, 0, 15], &[18, 15, 0]],
                &[&[0, 20, 25], &[20, 0, 20], &[25, 20, 0]],
            ),
            line(
                "PL",
                &["C1", "C2", "C3"],
                &[&[0, 12, 14], &[12, 0, 12], &[14, 12, 0]],
                &[&[0, 16, 18], &[16, 0, 16], &[18, 16, 0]],
            ),
        ],
        transfers: if with_transfer {
            vec![transfer("GL", "B2", "PL", "C1")]
        } else {
            vec![]
        },
    }
}

/// Recomputes a journey's total by summing the policy's edge weight along
/// the reported path.
fn recomputed_total(network: &FareNetwork, journey: &Journey, policy: FarePolicy) -> Fare {
    journey
        .stations
        .windows(2)
        .map(|pair| {
            network
                .fare_between(&pair[0], &pair[1])
                .expect("reported path must follow real edges")
                .fare(policy)
        })
        .sum()
}

#[test]
fn same_station_is_free_for_both_policies() {
    let network = build_fare_network(&two_line_directory(true)).unwrap();
    let a1 = station("GL", "A1");

    let fares = network.shortest_paths(&a1, &a1).unwrap();
    assert_eq!(fares.stored_value.total, Fare::ZERO);
    assert_eq!(fares.single_journey.total, Fare::ZERO);
    assert_eq!(fares.stored_value.stations, vec![a1.clone()]);
    assert_eq!(fares.single_journey.stations, vec![a1]);
}

#[test]
fn direct_matrix_edge_beats_a_chain() {
    // fare(X,Y)=12, fare(Y,Z)=15, fare(X,Z)=20: the direct edge must win
    // over the 27 through Y, proving the matrix expands pairwise.
    let directory = FareDirectory {
        matrices: vec![line(
            "GL",
            &["X", "Y", "Z"],
            &[&[0, 12, 20], &[12, 0, 15], &[20, 15, 0]],
            &[&[0, 12, 20], &[12, 0, 15], &[20, 15, 0]],
        )],
        transfers: vec![],
    };
    let network = build_fare_network(&directory).unwrap();

    let fares = network
        .shortest_paths(&station("GL", "X"), &station("GL", "Z"))
        .unwrap();
    assert_eq!(fares.single_journey.total, Fare::from_major(20));
    assert_eq!(
        fares.single_journey.stations,
        vec![station("GL", "X"), station("GL", "Z")]
    );
}

#[test]
fn cross_line_route_uses_the_transfer_at_zero_cost() {
    let network = build_fare_network(&two_line_directory(true)).unwrap();
    let (b2, c1) = (station("GL", "B2"), station("PL", "C1"));

    let fares = network.shortest_paths(&b2, &c1).unwrap();
    assert_eq!(fares.stored_value.total, Fare::ZERO);
    assert_eq!(fares.single_journey.total, Fare::ZERO);
    assert_eq!(fares.stored_value.stations, vec![b2.clone(), c1.clone()]);

    // The whole cross-network journey prices as the two intra-line legs.
    let fares = network
        .shortest_paths(&station("GL", "A1"), &station("PL", "C3"))
        .unwrap();
    assert_eq!(fares.stored_value.total, Fare::from_major(18 + 14));
    assert_eq!(fares.single_journey.total, Fare::from_major(25 + 18));
}

#[test]
fn totals_match_the_reported_paths() {
    let network = build_fare_network(&two_line_directory(true)).unwrap();
    let pairs = [
        (station("GL", "A1"), station("PL", "C3")),
        (station("GL", "B1"), station("PL", "C2")),
        (station("GL", "A1"), station("GL", "B2")),
    ];

    for (from, to) in pairs {
        let fares = network.shortest_paths(&from, &to).unwrap();
        assert_eq!(
            fares.stored_value.total,
            recomputed_total(&network, &fares.stored_value, FarePolicy::StoredValueCard)
        );
        assert_eq!(
            fares.single_journey.total,
            recomputed_total(&network, &fares.single_journey, FarePolicy::SingleJourneyTicket)
        );
        assert_eq!(fares.stored_value.stations.first(), Some(&from));
        assert_eq!(fares.stored_value.stations.last(), Some(&to));
    }
}

#[test]
fn totals_are_symmetric() {
    let network = build_fare_network(&two_line_directory(true)).unwrap();
    let (from, to) = (station("GL", "A1"), station("PL", "C3"));

    let forward = network.shortest_paths(&from, &to).unwrap();
    let backward = network.shortest_paths(&to, &from).unwrap();
    assert_eq!(forward.stored_value.total, backward.stored_value.total);
    assert_eq!(forward.single_journey.total, backward.single_journey.total);
}

#[test]
fn policies_may_take_different_routes() {
    let mut network = FareNetwork::new();
    let (a, b, c) = (station("GL", "A"), station("GL", "B"), station("GL", "C"));
    // Cheap hops for the card, cheap direct edge for the ticket.
    network.add_edge(&a, &b, FareInfo::new(Fare::from_major(1), Fare::from_major(10)));
    network.add_edge(&b, &c, FareInfo::new(Fare::from_major(1), Fare::from_major(10)));
    network.add_edge(&a, &c, FareInfo::new(Fare::from_major(5), Fare::from_major(5)));

    let fares = network.shortest_paths(&a, &c).unwrap();
    assert_eq!(fares.stored_value.total, Fare::from_major(2));
    assert_eq!(fares.stored_value.stations, vec![a.clone(), b, c.clone()]);
    assert_eq!(fares.single_journey.total, Fare::from_major(5));
    assert_eq!(fares.single_journey.stations, vec![a, c]);
}

#[test]
fn unknown_stations_are_rejected() {
    let network = build_fare_network(&two_line_directory(true)).unwrap();
    let ghost = station("GL", "Nowhere");
    let a1 = station("GL", "A1");

    assert!(matches!(
        network.shortest_paths(&ghost, &a1),
        Err(Error::UnknownStation(missing)) if missing == ghost
    ));
    assert!(matches!(
        network.shortest_paths(&a1, &ghost),
        Err(Error::UnknownStation(missing)) if missing == ghost
    ));
}

#[test]
fn isolated_station_yields_no_path_not_a_fabricated_fare() {
    let mut network = build_fare_network(&two_line_directory(true)).unwrap();
    let lone = station("GL", "Depot");
    network.ensure_node(&lone);

    let err = network.shortest_paths(&lone, &station("GL", "A1")).unwrap_err();
    assert!(matches!(err, Error::NoPath { .. }));

    // The same station still answers the trivial self-query.
    let fares = network.shortest_paths(&lone, &lone).unwrap();
    assert_eq!(fares.stored_value.total, Fare::ZERO);
}

#[test]
fn negative_weights_are_treated_as_absent() {
    let mut network = FareNetwork::new();
    let (a, b, c) = (station("GL", "A"), station("GL", "B"), station("GL", "C"));
    // Corrupt single-journey amount on the direct edge; the detour stays
    // valid for that policy.
    network.add_edge(&a, &b, FareInfo::new(Fare::from_major(5), Fare::from_minor(-100)));
    network.add_edge(&a, &c, FareInfo::new(Fare::from_major(20), Fare::from_major(1)));
    network.add_edge(&c, &b, FareInfo::new(Fare::from_major(20), Fare::from_major(1)));

    let fares = network.shortest_paths(&a, &b).unwrap();
    assert_eq!(fares.stored_value.total, Fare::from_major(5));
    assert_eq!(fares.stored_value.stations.len(), 2);
    assert_eq!(fares.single_journey.total, Fare::from_major(2));
    assert_eq!(fares.single_journey.stations.len(), 3);
}

#[test]
fn severed_networks_fail_the_query_only() {
    let network = build_fare_network(&two_line_directory(false)).unwrap();
    let (a1, c3) = (station("GL", "A1"), station("PL", "C3"));

    assert!(matches!(
        network.shortest_paths(&a1, &c3),
        Err(Error::NoPath { .. })
    ));
    // Intra-line queries on the same graph still succeed.
    assert!(network.shortest_paths(&a1, &station("GL", "B2")).is_ok());
}

#[test]
fn adding_a_transfer_never_raises_a_total() {
    let severed = build_fare_network(&two_line_directory(false)).unwrap();
    let joined = build_fare_network(&two_line_directory(true)).unwrap();

    let all_stations: Vec<Station> = severed.stations().cloned().collect();
    for from in &all_stations {
        for to in &all_stations {
            let after = joined.shortest_paths(from, to).unwrap();
            match severed.shortest_paths(from, to) {
                Ok(before) => {
                    assert!(after.stored_value.total <= before.stored_value.total);
                    assert!(after.single_journey.total <= before.single_journey.total);
                }
                // Previously unreachable pairs become finite, which is the
                // point of the transfer.
                Err(Error::NoPath { .. }) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }
}

#[test]
fn rebuilding_from_the_same_directory_is_deterministic() {
    let directory = two_line_directory(true);
    let first = build_fare_network(&directory).unwrap();
    let second = build_fare_network(&directory).unwrap();

    assert_eq!(first.station_count(), second.station_count());
    assert_eq!(first.edge_count(), second.edge_count());

    let (from, to) = (station("GL", "A1"), station("PL", "C3"));
    assert_eq!(
        first.shortest_paths(&from, &to).unwrap(),
        second.shortest_paths(&from, &to).unwrap()
    );
}

#[test]
fn failed_build_returns_no_network_at_all() {
    // Three stations but a 2x2 single-journey table.
    let directory = FareDirectory {
        matrices: vec![line(
            "GL",
            &["A", "B", "C"],
            &[&[0, 15, 18], &[15, 0, 15], &[18, 15, 0]],
            &[&[0, 20], &[20, 0]],
        )],
        transfers: vec![],
    };

    let err = build_fare_network(&directory).unwrap_err();
    assert!(matches!(
        err,
        Error::TableRowCount {
            table: "SJT",
            expected: 3,
            actual: 2,
            ..
        }
    ));
}
