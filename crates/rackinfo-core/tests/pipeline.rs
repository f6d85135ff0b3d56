//! End-to-end pipeline tests over the public API.
//!
//! These drive the full flow (mock sinfo output → decoding → filtering →
//! rendering) without touching a real scheduler, using the mock clients.

use rackinfo_core::{
    BlockDecoder, FieldDecoder, FilterConfig, Format, HostlistClient, OutputField,
    PartitionFilter, RackError, RackFilter, SinfoClient, StateFilter, report,
};

/// A small cluster: two racks on the default partition, one rack on a
/// secondary partition, mixed states.
const INVENTORY: &str = "\
cpu-h21a5-u1-svn1 1 cclake* idle
cpu-h21a5-u2-svn1 1 cclake* idle
cpu-h21a5-u3-svn1 1 cclake* alloc
cpu-h21b2-u1-svn1 1 cclake* idle
cpu-h21b2-u2-svn1 1 cclake* down*
cpu-h21c9-u1-svn1 1 icelake idle
";

fn default_idle() -> FilterConfig {
    FilterConfig {
        states: StateFilter::parse("idle"),
        racks: RackFilter::All,
        partitions: PartitionFilter::Default,
        numnodes: None,
    }
}

#[tokio::test]
async fn exclude_list_for_sbatch_covers_everything_but_idle_default() {
    let nodes = SinfoClient::mock(INVENTORY).fetch(&FieldDecoder).await.unwrap();
    let filtered = default_idle().apply(&nodes);

    let exclude = report::render(
        &nodes,
        &filtered,
        OutputField::Hostname,
        Format::Exclude,
        false,
    )
    .unwrap();
    assert_eq!(
        exclude,
        "cpu-h21a5-u3-svn1,cpu-h21b2-u2-svn1,cpu-h21c9-u1-svn1"
    );

    let csv = report::render(&nodes, &filtered, OutputField::Hostname, Format::Csv, false)
        .unwrap();
    assert_eq!(csv, "cpu-h21a5-u1-svn1,cpu-h21a5-u2-svn1,cpu-h21b2-u1-svn1");

    // Filtered and excluded sets partition the inventory.
    let mut union: Vec<&str> = csv.split(',').chain(exclude.split(',')).collect();
    union.sort_unstable();
    let mut all: Vec<&str> = nodes.iter().map(|n| n.hostname.as_str()).collect();
    all.sort_unstable();
    assert_eq!(union, all);
}

#[tokio::test]
async fn numnodes_selects_racks_with_exactly_that_many_idle_nodes() {
    let nodes = SinfoClient::mock(INVENTORY).fetch(&FieldDecoder).await.unwrap();
    let config = FilterConfig {
        numnodes: Some(2),
        ..default_idle()
    };

    let filtered = config.apply(&nodes);
    let racks = report::render(&nodes, &filtered, OutputField::Rack, Format::Csv, true).unwrap();
    // h21a5 has exactly two idle default-partition nodes; h21b2 has one.
    assert_eq!(racks, "h21a5");
}

#[tokio::test]
async fn default_partition_filter_drops_secondary_partitions() {
    let nodes = SinfoClient::mock(INVENTORY).fetch(&FieldDecoder).await.unwrap();
    let filtered = default_idle().apply(&nodes);
    assert!(filtered.iter().all(|n| n.partition == "cclake*"));
    assert!(!filtered.iter().any(|n| n.hostname == "cpu-h21c9-u1-svn1"));
}

#[tokio::test]
async fn count_format_reports_total_and_filtered() {
    let nodes = SinfoClient::mock(INVENTORY).fetch(&FieldDecoder).await.unwrap();
    let filtered = default_idle().apply(&nodes);
    let count =
        report::render(&nodes, &filtered, OutputField::Hostname, Format::Count, false).unwrap();
    assert_eq!(count, "6\n3");
}

#[tokio::test]
async fn multi_node_line_aborts_the_whole_fetch() {
    let client = SinfoClient::mock("cpu-e-1 1 cclake idle\nnode01 3 cclake idle\n");
    let err = client.fetch(&BlockDecoder::default()).await.unwrap_err();
    assert!(matches!(err, RackError::MultiNodeLine { .. }));
}

#[tokio::test]
async fn rack_summary_over_block_numbered_cluster() {
    // Legacy naming: sequential node ids, racks as blocks of 56.
    let inventory = "\
cpu-e-55 1 cclake* idle
cpu-e-56 1 cclake* alloc
cpu-e-57 1 cclake* idle
cpu-e-58 1 cclake* down*
";
    let nodes = SinfoClient::mock(inventory)
        .fetch(&BlockDecoder::default())
        .await
        .unwrap();

    let states = StateFilter::parse("idle,available,alloc");
    let groups = report::group_by_rack(&nodes, &states);
    assert_eq!(groups.len(), 2);

    let hostlist = HostlistClient::mock();
    let all = hostlist.compact(&groups[0].all).await.unwrap();
    let matching = hostlist.compact(&groups[0].matching).await.unwrap();
    assert_eq!(
        report::summary_line(&groups[0], &all, &matching),
        "Rack 1 (cpu-e-55,cpu-e-56): 2 nodes - cpu-e-55,cpu-e-56"
    );

    let all = hostlist.compact(&groups[1].all).await.unwrap();
    let matching = hostlist.compact(&groups[1].matching).await.unwrap();
    assert_eq!(
        report::summary_line(&groups[1], &all, &matching),
        "Rack 2 (cpu-e-57,cpu-e-58): 1 node - cpu-e-57"
    );
}
