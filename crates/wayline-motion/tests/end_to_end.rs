use std::rc::Rc;

use wayline_core::{GameMap, PlayerId, SegmentPlan, TerrainMap};
use wayline_motion::{
    GridPathPlan, MotionPlanRecord, MotionSink, PlanBook, PlanRecorder, SegmentMotion, TrainMotion,
    TrainRailPathPlan, pack_bytes, unpack, unpack_bytes,
};
use wayline_paths::{
    PathFinder, PipelineBuilder, SearchBudget, SearchConfig, ShoreQuery, StepStatus, WaterAdapter, WaterComponents,
    rail_path_finder, smooth_path, water_or_shoreline, water_path_finder,
};

#[test]
fn smoothed_path_samples_halfway() {
    let map = TerrainMap::new(10, 3);
    let plan = smooth_path(&map, &[10, 11, 12, 22], water_or_shoreline);
    assert_eq!(plan.points(), &[10, 22]);
    assert_eq!(plan.segment_steps(), &[3]);

    let record = MotionPlanRecord::Grid(GridPathPlan {
        unit_id: 1,
        plan_id: 1,
        start_tick: 0,
        ticks_per_step: 1,
        path: plan.points().to_vec(),
    });
    let out = unpack_bytes(&pack_bytes(std::slice::from_ref(&record)));
    assert_eq!(out.records, vec![record]);
    let MotionPlanRecord::Grid(decoded) = &out.records[0] else {
        panic!("expected a grid plan");
    };

    let motion = SegmentMotion::from_grid_plan(decoded, map.width());
    assert_eq!(motion.plan(), &plan);
    let s = motion.sample(1.5);
    assert_eq!((s.x, s.y), (1.0, 1.5));
    assert_eq!((s.tile0, s.tile1), (10, 22));
    assert!(!s.is_complete);
}

#[test]
fn client_timing_matches_smoothed_detour() {
    // A rock at (2,1) forces the dense route through row 0 or row 2.
    let map = TerrainMap::from_ascii(
        "
        ~~~~~
        ~~.~~
        ~~~~~
        ",
    )
    .unwrap();
    let mut finder = PipelineBuilder::astar(WaterAdapter::new(&map, 0))
        .naval_smoothing(&map)
        .build();
    let plan = finder.plan_segments(&[5], 9).unwrap();
    assert_eq!(plan.points(), &[5, 9]);

    let record = GridPathPlan {
        unit_id: 3,
        plan_id: 1,
        start_tick: 0,
        ticks_per_step: 1,
        path: plan.points().to_vec(),
    };
    let out = unpack_bytes(&pack_bytes(&[record.into()]));
    let Some(MotionPlanRecord::Grid(decoded)) = out.records.first() else {
        panic!("expected a grid plan");
    };
    let motion = SegmentMotion::from_grid_plan(decoded, map.width());
    assert_eq!(motion.plan(), &plan);
    assert_eq!(motion.total_steps(), plan.total_steps());
}

#[test]
fn pipeline_plan_survives_the_wire() {
    let map = TerrainMap::new(10, 3);
    let mut finder = PipelineBuilder::astar(WaterAdapter::new(&map, 0))
        .naval_smoothing(&map)
        .build();
    let plan = finder.plan_segments(&[10], 22).unwrap();
    assert_eq!(plan, SegmentPlan::new(vec![10, 22], vec![3]));

    let mut recorder = PlanRecorder::new();
    recorder.record_motion_plan(
        GridPathPlan {
            unit_id: 7,
            plan_id: 0,
            start_tick: 20,
            ticks_per_step: 2,
            path: plan.points().to_vec(),
        }
        .into(),
    );
    let mut book = PlanBook::new();
    assert_eq!(book.apply_unpacked(unpack(&recorder.pack_tick())), 1);
    let Some(MotionPlanRecord::Grid(live)) = book.get(7) else {
        panic!("plan for unit 7 missing");
    };
    let motion = SegmentMotion::from_grid_plan(live, map.width());
    assert!(motion.sample(26.0).is_complete);
    assert_eq!(motion.sample(23.0).x, 1.0);
}

#[test]
fn naval_launch_and_voyage() {
    let map = Rc::new(
        TerrainMap::from_ascii(
            "
            1111111111
            ~~~~~~~~~~
            ~~~~~~~~~~
            ~~~~~~~~~~
            ~~~~~~~~~~
            ..........
            ",
        )
        .unwrap(),
    );
    let mini = Rc::new(map.mini_map());
    let cc = Rc::new(WaterComponents::compute(&*map));
    let config = SearchConfig {
        searches_per_tick: 1,
        ..SearchConfig::default()
    };

    // (7,4) is water right below the far coast.
    let target = 4 * 10 + 7;
    let mut query = ShoreQuery::new(map.clone(), mini.clone(), cc.clone(), config);
    let launch = query.closest_shore_by_water(PlayerId(1), target).unwrap();
    assert_eq!(launch, 7);

    let mut stepper = PipelineBuilder::new(water_path_finder(map.clone(), mini, cc, &config))
        .stepper(SearchBudget::from_config(&config));
    let mut at = launch;
    let mut ticks = 0;
    loop {
        stepper.budget().reset();
        let step = stepper.next(at, target);
        match step.status {
            StepStatus::Next => {
                at = step.node;
                assert!(map.is_water(at) || at == target, "stepped onto land at {at}");
            }
            StepStatus::Complete => break,
            StepStatus::Pending | StepStatus::NotFound => panic!("unexpected {step:?}"),
        }
        ticks += 1;
        assert!(ticks < 100);
    }
    assert_eq!(at, target);
}

#[test]
fn train_follows_rail() {
    let map = TerrainMap::from_ascii(
        "
        ======
        ......
        ",
    )
    .unwrap();
    let path = rail_path_finder(&map).find_path(&[0], 5).unwrap();
    assert_eq!(path, vec![0, 1, 2, 3, 4, 5]);

    let record = TrainRailPathPlan {
        engine_unit_id: 1,
        car_unit_ids: vec![2, 3],
        plan_id: 1,
        start_tick: 0,
        speed: 1,
        spacing: 1,
        path,
    };
    let out = unpack_bytes(&pack_bytes(&[MotionPlanRecord::Train(record.clone())]));
    let Some(MotionPlanRecord::Train(decoded)) = out.records.first() else {
        panic!("expected a train plan");
    };
    assert_eq!(decoded, &record);

    let train = TrainMotion::new(decoded.clone(), map.width());
    let xs: Vec<f64> = train.sample_all(2.5).iter().map(|(_, s)| s.x).collect();
    assert_eq!(xs, vec![2.5, 1.5, 0.5]);
    assert!(train.is_complete(7.0));
}
