use cfftables::{
    Cff, Construction, ConstructionError, ConstructionProvider, EngineOutput, ErrorKind,
    StandardEngine,
};

#[test]
fn identity_scenario() {
    let cff = Cff::identity(1, 4).unwrap();
    assert_eq!((cff.t(), cff.n()), (4, 4));
    assert!(cff.verify());
    for c in 0..4 {
        assert_eq!(cff.subsets().get(c as isize).unwrap(), vec![c]);
    }
    for d in 1..6 {
        assert!(Cff::identity(d, 5).unwrap().verify());
    }
}

#[test]
fn sperner_scenario() {
    let cff = Cff::sperner(6).unwrap();
    assert_eq!(cff.repr(), "1-CFF(4,6)");
    assert!(cff.subsets().iter().all(|s| s.len() == 2));
    assert!(cff.verify());

    let bigger = Cff::sperner(30).unwrap();
    // C(6, 3) = 20 < 30 <= C(7, 3) = 35
    assert_eq!(bigger.t(), 7);
    assert!(bigger.verify());
}

#[test]
fn sts_scenarios() {
    let cff = Cff::sts(9).unwrap();
    assert_eq!(cff.repr(), "2-CFF(9,12)");
    assert!(cff.verify());

    let cff = Cff::sts(13).unwrap();
    assert_eq!((cff.t(), cff.n()), (13, 26));
    assert!(cff.verify());

    for v in [0, 2, 4, 5, 6, 8, 10, 11, 12] {
        assert_eq!(Cff::sts(v).unwrap_err().kind(), ErrorKind::InvalidArgument, "v={v}");
    }
}

#[test]
fn sts_is_not_three_cover_free() {
    let mut cff = Cff::sts(9).unwrap();
    cff.set_d(3).unwrap();
    assert!(!cff.verify());
    cff.set_d(1).unwrap();
    assert!(cff.verify());
}

#[test]
fn code_constructions_verify() {
    let rs = Cff::reed_solomon(4, 2).unwrap();
    assert_eq!(rs.repr(), "3-CFF(16,16)");
    assert!(rs.verify());

    let short = Cff::short_reed_solomon(5, 2, 4).unwrap();
    assert_eq!(short.repr(), "3-CFF(20,25)");
    assert!(short.verify());

    let pr = Cff::porat_rothschild(3, 2, 4).unwrap();
    assert_eq!((pr.t(), pr.n()), (12, 9));
    assert!(pr.verify());
}

#[test]
fn code_constructions_reject_bad_parameters() {
    assert_eq!(Cff::reed_solomon(6, 2).unwrap_err().kind(), ErrorKind::AllocationError);
    assert_eq!(Cff::reed_solomon(5, 1).unwrap_err().kind(), ErrorKind::AllocationError);
    assert_eq!(
        Cff::short_reed_solomon(5, 3, 6).unwrap_err().kind(),
        ErrorKind::AllocationError
    );
}

#[test]
fn double_scenarios() {
    let mut base = Cff::sts(9).unwrap();
    base.reduce(9).unwrap();
    let doubled = Cff::double(&base).unwrap();
    assert_eq!(doubled.n(), 18);
    assert_eq!(doubled.d(), 2);
    // aux size 5 is odd, so 5 + 1 extra rows
    assert_eq!(doubled.t(), 15);
    assert!(doubled.verify());

    let full = Cff::double(&Cff::sts(9).unwrap()).unwrap();
    assert_eq!(full.repr(), "2-CFF(17,24)");
    assert!(full.verify());

    let not_two = Cff::identity(1, 9).unwrap();
    assert_eq!(Cff::double(&not_two).unwrap_err().kind(), ErrorKind::InvalidArgument);
}

#[test]
fn recursive_constructions_verify() {
    let a = Cff::sts(7).unwrap();
    let b = Cff::identity(2, 3).unwrap();

    let ext = Cff::extend_by_one(&a).unwrap();
    assert_eq!(ext.repr(), "2-CFF(8,8)");
    assert!(ext.verify());

    let sum = Cff::add(&a, &b).unwrap();
    assert_eq!(sum.repr(), "2-CFF(10,10)");
    assert!(sum.verify());

    let prod = Cff::kronecker(&a, &b).unwrap();
    assert_eq!(prod.repr(), "2-CFF(21,21)");
    assert!(prod.verify());

    // inputs are untouched
    assert_eq!(a.repr(), "2-CFF(7,7)");
    assert_eq!(b.repr(), "2-CFF(3,3)");
}

#[test]
fn optimized_kronecker_checks_d() {
    let outer = Cff::sts(7).unwrap();
    let inner = Cff::sperner(4).unwrap();
    let bottom = Cff::sperner(5).unwrap();

    let cff = Cff::optimized_kronecker(&outer, &inner, &bottom).unwrap();
    assert_eq!(cff.d(), 2);
    assert_eq!(cff.t(), 2 * 7 + bottom.t() * inner.t());
    assert_eq!(cff.n(), 5 * 4);
    assert!(cff.verify());

    let err = Cff::optimized_kronecker(&outer, &inner, &outer).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    let err = Cff::optimized_kronecker(&inner, &inner, &bottom).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

/// Provider that refuses everything, standing in for an engine without the
/// requested construction
struct Refusing;

impl ConstructionProvider for Refusing {
    fn construct(&self, request: &Construction<'_>) -> Result<EngineOutput, ConstructionError> {
        Err(ConstructionError::Unsupported {
            construction: request.name(),
            reason: "disabled".into(),
        })
    }
}

#[test]
fn injected_provider() {
    let request = Construction::Identity { d: 1, n: 3 };
    let err = Cff::construct_with(&Refusing, &request).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AllocationError);
    assert!(err.to_string().contains("identity"));

    let cff = Cff::construct_with(&StandardEngine, &request).unwrap();
    assert_eq!(cff.repr(), "1-CFF(3,3)");
}

#[test]
fn oversized_requests_fail_cleanly() {
    let err = Cff::all_zeros(1, 1 << 20, 1 << 20).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AllocationError);
}
