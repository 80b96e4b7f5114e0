use super::load_input;
use crate::cli::InspectArgs;
use crate::error::Result;
use cgswap::core::forcefield::table::ForceField;
use cgswap::core::models::interaction::InteractionKind;
use cgswap::core::models::topology::Topology;

/// One line per residue: index, name, one-letter code (`-` for residues
/// without a template), secondary structure and bead count.
fn residue_table(topology: &Topology, forcefield: &ForceField) -> Vec<String> {
    (1..=topology.residue_count())
        .map(|index| {
            let beads = topology.residue_beads(index);
            let name = topology.residue_name(index).unwrap_or("?");
            let structure = beads
                .first()
                .and_then(|&id| topology.bead(id))
                .map(|bead| bead.structure.code())
                .unwrap_or('-');
            let code = forcefield.one_letter_code(name).unwrap_or('-');
            format!(
                "{index:>4} {name:<5} {code} {structure} {count:>3}",
                count = beads.len()
            )
        })
        .collect()
}

pub fn run(args: InspectArgs) -> Result<()> {
    let topology = load_input(&args.input)?;
    let forcefield = ForceField::martini22();

    println!("Chemistry: {}", topology.chemical_name);
    println!(
        "Molecule:  {} ({} beads, {} residues)",
        topology.molecule_name,
        topology.atom_count(),
        topology.residue_count()
    );
    for kind in InteractionKind::ALL {
        println!("{:<12} {}", kind.section(), topology.interaction_count(kind));
    }
    println!("Sequence:  {}", topology.sequence().join("-"));
    for line in residue_table(&topology, &forcefield) {
        println!("{line}");
    }
    Ok(())
}
