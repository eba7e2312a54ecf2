#![allow(dead_code)]

use heart_field::label::LabelPlan;
use heart_field::render::VignettePlan;
use heart_field::sprite::{Glyph, Sprite};
use heart_field::{Result, Surface, Theme, Viewport};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear(Viewport),
    Vignette(VignettePlan),
    Sprite(Sprite, Glyph),
    Label(LabelPlan),
}

/// Surface that remembers every call, in order.
#[derive(Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
}

impl Recorder {
    pub fn sprites(&self) -> Vec<Sprite> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Sprite(s, _) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn label(&self) -> Option<&LabelPlan> {
        self.ops.iter().find_map(|op| match op {
            Op::Label(l) => Some(l),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn clear(&mut self, viewport: &Viewport) -> Result<()> {
        self.ops.push(Op::Clear(*viewport));
        Ok(())
    }

    fn vignette(&mut self, plan: &VignettePlan) -> Result<()> {
        self.ops.push(Op::Vignette(plan.clone()));
        Ok(())
    }

    fn sprite(&mut self, sprite: &Sprite, glyph: Glyph, _theme: &Theme) -> Result<()> {
        self.ops.push(Op::Sprite(*sprite, glyph));
        Ok(())
    }

    fn label(&mut self, plan: &LabelPlan, _theme: &Theme) -> Result<()> {
        self.ops.push(Op::Label(plan.clone()));
        Ok(())
    }
}

pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}
