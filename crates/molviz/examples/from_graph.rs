//! Example: Building a molecule from atoms and bonds
//!
//! This example builds acetic acid directly on the graph, without parsing
//! formula text, lays it out and renders it in two notations.

use molviz::{
    StructureBuilder,
    config::{AppConfig, DisplayMode},
    layout::LayoutStrategy,
    model::{Atom, BondType},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building acetic acid from the graph API...\n");

    let mut builder = StructureBuilder::new(AppConfig::default());
    let graph = builder.graph_mut();

    // Heavy atoms only; hydrogens are carried as counts on their parents
    let methyl = graph.add_atom(Atom::new("C").with_hydrogen_count(3));
    let carboxyl = graph.add_atom(Atom::new("C"));
    let carbonyl_o = graph.add_atom(Atom::new("O"));
    let hydroxyl_o = graph.add_atom(Atom::new("O").with_hydrogen_count(1));

    graph.add_bond(methyl, carboxyl)?;
    let double = graph.add_bond(carboxyl, carbonyl_o)?;
    graph.add_bond(carboxyl, hydroxyl_o)?;
    if let Some(bond) = graph.bond_mut(double) {
        bond.set_bond_type(BondType::Double);
    }

    builder.apply_layout(LayoutStrategy::Branched)?;

    println!("Formula: {}", builder.formula());
    println!("Linear:  {}", builder.linear_formula());
    println!(
        "Weight:  {:.2} g/mol\n",
        builder.graph().molecular_weight()
    );

    for mode in [DisplayMode::Structural, DisplayMode::Skeletal] {
        let svg = builder.render_svg(mode);
        println!("{mode}: {} bytes of SVG", svg.len());
    }

    Ok(())
}
