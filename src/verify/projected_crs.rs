//! Projected CRSs (GIGS 2006).
//!
//! The CRS is identified by its EPSG code only. Its datum identifier and the
//! name of its base geographic CRS are dependencies, checked under dependency
//! identification. The coordinate system must be two-dimensional with the
//! tabulated axis order and orientation.

use crate::assertions::{assert_contains_code, assert_equals, assert_equals_str, assert_present};
use crate::case::{CaseContext, Expected, Outcome, VerificationCase};
use crate::config::CapabilityKey;
use crate::error::{AssertionFailure, SkipReason};
use crate::referencing::{AxisDirection, EPSG, Factories, IdentifiedObject, ProjectedCrs, Validatable};

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedCrsDescriptor {
    pub code: i32,
    /// Name of the base geographic CRS.
    pub base_crs_name: String,
    pub datum_code: i32,
    /// Informative. Real projection names vary per zone.
    pub projection_names: Vec<String>,
    /// Northing before easting.
    pub north_axis_first: bool,
    /// Easting grows towards the west.
    pub west_orientated: bool,
    /// Northing grows towards the south.
    pub south_orientated: bool,
    pub important: bool,
}

impl ProjectedCrsDescriptor {
    pub fn axis_directions(&self) -> [AxisDirection; 2] {
        let x = if self.west_orientated {
            AxisDirection::West
        } else {
            AxisDirection::East
        };
        let y = if self.south_orientated {
            AxisDirection::South
        } else {
            AxisDirection::North
        };
        if self.north_axis_first { [y, x] } else { [x, y] }
    }
}

impl Expected for ProjectedCrsDescriptor {
    fn object_type(&self) -> &'static str {
        "ProjectedCRS"
    }

    fn code(&self) -> i32 {
        self.code
    }
}

pub fn compare_projected_crs(
    context: &CaseContext<'_>,
    expected: &ProjectedCrsDescriptor,
    crs: &dyn ProjectedCrs,
) -> Result<(), AssertionFailure> {
    context.validate(Validatable::ProjectedCrs(crs))?;
    assert_contains_code("ProjectedCRS.getIdentifiers()", EPSG, expected.code, crs.identifiers())?;

    let base = assert_present("ProjectedCRS.getBaseCRS()", crs.base_crs())?;
    let datum = assert_present("ProjectedCRS.getDatum()", crs.datum())?;
    context.check(CapabilityKey::IsDependencyIdentificationSupported, || {
        assert_contains_code(
            "ProjectedCRS.getDatum().getIdentifiers()",
            EPSG,
            expected.datum_code,
            datum.identifiers(),
        )?;
        context.check(CapabilityKey::IsStandardNameSupported, || {
            assert_equals_str("ProjectedCRS.getBaseCRS().getName()", &expected.base_crs_name, base.name())
        })
    })?;

    let cs = assert_present("ProjectedCRS.getCoordinateSystem()", crs.coordinate_system())?;
    assert_equals("ProjectedCRS.getCoordinateSystem().getDimension()", 2, cs.dimension())?;
    for (i, direction) in expected.axis_directions().into_iter().enumerate() {
        assert_equals(
            &format!("ProjectedCRS.getCoordinateSystem().getAxis({}).getDirection()", i),
            Some(direction),
            cs.axis_direction(i),
        )?;
    }
    Ok(())
}

pub fn projected_crs_case<'a>(
    factories: &Factories<'a>,
    context: CaseContext<'a>,
    expected: ProjectedCrsDescriptor,
) -> VerificationCase<'a, ProjectedCrsDescriptor, Box<dyn ProjectedCrs>> {
    match factories.crs {
        Some(factory) => VerificationCase::new(expected, context, move |d: &ProjectedCrsDescriptor| {
            factory.create_projected_crs(&d.code.to_string())
        }),
        None => VerificationCase::skipped(
            expected,
            context,
            SkipReason::MissingFactory("CrsAuthorityFactory"),
        ),
    }
}

pub fn verify_projected_crs(
    factories: &Factories<'_>,
    context: CaseContext<'_>,
    expected: ProjectedCrsDescriptor,
) -> Outcome {
    projected_crs_case(factories, context, expected)
        .verify(|ctx, d, crs| compare_projected_crs(ctx, d, crs.as_ref()))
}
